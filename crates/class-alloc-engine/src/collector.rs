// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Expands in-scope (course, group) pairs into placeable sessions.
//!
//! Hours already covered by assignments still present in range are
//! subtracted first, so re-running over a partially planned period
//! only generates what is missing. Pairs with nothing left are skipped
//! silently.

use crate::ledger::AssignmentLedger;
use class_alloc_core::units::Minutes;
use class_alloc_model::catalog::Catalog;
use class_alloc_model::id::{CourseId, GroupId};
use class_alloc_model::request::ValidScope;
use std::cmp::Ordering;
use std::fmt::Display;

/// One unplaced unit of required teaching time. Exists only during a
/// run; it either becomes a committed assignment or a failure entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    course: CourseId,
    group: GroupId,
    length: Minutes,
}

impl Session {
    #[inline]
    pub fn new(course: CourseId, group: GroupId, length: Minutes) -> Self {
        Self {
            course,
            group,
            length,
        }
    }

    #[inline]
    pub fn course(&self) -> CourseId {
        self.course
    }

    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }

    #[inline]
    pub fn length(&self) -> Minutes {
        self.length
    }
}

impl Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({}, {}, {})", self.course, self.group, self.length)
    }
}

/// Ordering of (remaining load, course, group) triples: heaviest load
/// first, then ascending course id, then ascending group id.
///
/// Placing the largest remaining loads first keeps big courses from
/// being squeezed out by fragmentation of the remaining slots.
pub fn session_order(
    a: (Minutes, CourseId, GroupId),
    b: (Minutes, CourseId, GroupId),
) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2))
}

/// The ordered list of still-needed sessions for every in-scope pair.
pub fn collect_sessions(
    catalog: &Catalog,
    scope: &ValidScope,
    ledger: &AssignmentLedger,
) -> Vec<Session> {
    let mut loads: Vec<(Minutes, CourseId, GroupId)> = Vec::new();
    for enrolment in catalog.enrolments() {
        if !scope.courses().includes(&enrolment.course())
            || !scope.groups().includes(&enrolment.group())
        {
            continue;
        }
        let course = catalog
            .course(enrolment.course())
            .expect("catalog enrolments reference known courses");
        let covered = ledger.covered_minutes(enrolment.course(), enrolment.group());
        let remaining = course.required_hours().saturating_sub(covered);
        if remaining.is_zero() {
            continue;
        }
        loads.push((remaining, enrolment.course(), enrolment.group()));
    }
    loads.sort_by(|a, b| session_order(*a, *b));

    let mut sessions = Vec::new();
    for (remaining, course_id, group_id) in loads {
        let course = catalog
            .course(course_id)
            .expect("catalog enrolments reference known courses");
        let needed = remaining.div_ceil(course.session_length());
        for _ in 0..needed {
            sessions.push(Session::new(course_id, group_id, course.session_length()));
        }
    }
    sessions
}
