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

//! Feasibility checking of one candidate placement.
//!
//! Every check runs; nothing short-circuits. A failure report can
//! therefore cite every constraint a candidate violates, not just the
//! first one found.

use crate::availability::AvailabilityIndex;
use crate::ledger::AssignmentLedger;
use chrono::NaiveDate;
use class_alloc_core::units::{Capacity, Headcount};
use class_alloc_model::catalog::{Course, Group, Room, TimeSlot};
use class_alloc_model::id::{AssignmentId, GroupId, RoomId, TeacherId};
use class_alloc_model::record::ConflictKind;
use std::fmt::Display;

/// One possible placement of a session, not yet committed.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    date: NaiveDate,
    slot: &'a TimeSlot,
    course: &'a Course,
    group: &'a Group,
    room: &'a Room,
}

impl<'a> Candidate<'a> {
    #[inline]
    pub fn new(
        date: NaiveDate,
        slot: &'a TimeSlot,
        course: &'a Course,
        group: &'a Group,
        room: &'a Room,
    ) -> Self {
        Self {
            date,
            slot,
            course,
            group,
            room,
        }
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub fn slot(&self) -> &'a TimeSlot {
        self.slot
    }

    #[inline]
    pub fn course(&self) -> &'a Course {
        self.course
    }

    #[inline]
    pub fn group(&self) -> &'a Group {
        self.group
    }

    #[inline]
    pub fn room(&self) -> &'a Room {
        self.room
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.course.teacher()
    }
}

impl Display for Candidate<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candidate({} {} {} {} {})",
            self.date,
            self.slot.id(),
            self.course.id(),
            self.group.id(),
            self.room.id()
        )
    }
}

/// A single violated constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    RoomCapacity {
        room: RoomId,
        capacity: Capacity,
        headcount: Headcount,
    },
    RoomOccupied {
        room: RoomId,
        by: AssignmentId,
    },
    TeacherOccupied {
        teacher: TeacherId,
        by: AssignmentId,
    },
    GroupOccupied {
        group: GroupId,
        by: AssignmentId,
    },
    TeacherUnavailable {
        teacher: TeacherId,
        date: NaiveDate,
    },
}

impl Violation {
    /// The conflict taxonomy bucket this violation falls into.
    #[inline]
    pub fn conflict_kind(&self) -> ConflictKind {
        match self {
            Violation::RoomCapacity { .. } | Violation::RoomOccupied { .. } => ConflictKind::Room,
            Violation::TeacherOccupied { .. } | Violation::TeacherUnavailable { .. } => {
                ConflictKind::Teacher
            }
            Violation::GroupOccupied { .. } => ConflictKind::Group,
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::RoomCapacity {
                room,
                capacity,
                headcount,
            } => write!(
                f,
                "{room} seats {} but the group counts {}",
                capacity.value(),
                headcount.value()
            ),
            Violation::RoomOccupied { room, by } => {
                write!(f, "{room} is already booked by {by}")
            }
            Violation::TeacherOccupied { teacher, by } => {
                write!(f, "{teacher} already teaches {by}")
            }
            Violation::GroupOccupied { group, by } => {
                write!(f, "{group} already attends {by}")
            }
            Violation::TeacherUnavailable { teacher, date } => {
                write!(f, "{teacher} is unavailable on {date}")
            }
        }
    }
}

/// Joins violations into one human-readable reason line.
pub fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of checking one candidate against committed state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feasibility {
    violations: Vec<Violation>,
}

impl Feasibility {
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }

    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[inline]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Evaluates all placement constraints for `candidate`.
pub fn check_candidate(
    ledger: &AssignmentLedger,
    availability: &AvailabilityIndex,
    candidate: &Candidate<'_>,
) -> Feasibility {
    let mut violations = Vec::new();
    let date = candidate.date();
    let slot = candidate.slot();

    let capacity = candidate.room().capacity();
    let headcount = candidate.group().headcount();
    if !capacity.accommodates(headcount) {
        violations.push(Violation::RoomCapacity {
            room: candidate.room().id(),
            capacity,
            headcount,
        });
    }

    if let Some(by) = ledger.room_conflict(candidate.room().id(), date, slot.id()) {
        violations.push(Violation::RoomOccupied {
            room: candidate.room().id(),
            by,
        });
    }

    if let Some(by) = ledger.teacher_conflict(candidate.teacher(), date, slot.id()) {
        violations.push(Violation::TeacherOccupied {
            teacher: candidate.teacher(),
            by,
        });
    }

    if let Some(by) = ledger.group_conflict(candidate.group().id(), date, slot.id()) {
        violations.push(Violation::GroupOccupied {
            group: candidate.group().id(),
            by,
        });
    }

    if !availability.is_available(candidate.teacher(), date, &slot.window()) {
        violations.push(Violation::TeacherUnavailable {
            teacher: candidate.teacher(),
            date,
        });
    }

    Feasibility { violations }
}
