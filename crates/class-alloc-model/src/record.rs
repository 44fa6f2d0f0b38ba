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

//! Persisted records: committed assignments and detected conflicts.
//!
//! The engine only ever creates assignments with status
//! [`AssignmentStatus::Planned`]; the other statuses are written by the
//! external reschedule workflow and merely respected here.

use crate::id::{AssignmentId, ConflictId, CourseId, GroupId, RoomId, TeacherId, TimeSlotId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentStatus {
    Planned,
    Confirmed,
    Cancelled,
}

impl Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Planned => write!(f, "planned"),
            AssignmentStatus::Confirmed => write!(f, "confirmed"),
            AssignmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A committed placement of one session on a concrete date, slot, room
/// and teacher. Persists beyond the run that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    id: AssignmentId,
    date: NaiveDate,
    course: CourseId,
    group: GroupId,
    teacher: TeacherId,
    room: RoomId,
    slot: TimeSlotId,
    status: AssignmentStatus,
    comment: Option<String>,
}

impl Assignment {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        id: AssignmentId,
        date: NaiveDate,
        course: CourseId,
        group: GroupId,
        teacher: TeacherId,
        room: RoomId,
        slot: TimeSlotId,
        status: AssignmentStatus,
    ) -> Self {
        Self {
            id,
            date,
            course,
            group,
            teacher,
            room,
            slot,
            status,
            comment: None,
        }
    }

    #[inline]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[inline]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
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
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    #[inline]
    pub fn room(&self) -> RoomId {
        self.room
    }

    #[inline]
    pub fn slot(&self) -> TimeSlotId {
        self.slot
    }

    #[inline]
    pub fn status(&self) -> AssignmentStatus {
        self.status
    }

    #[inline]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Whether this assignment occupies its (room, teacher, group) slot.
    /// Cancelled assignments hold no resources.
    #[inline]
    pub fn is_occupying(&self) -> bool {
        self.status != AssignmentStatus::Cancelled
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Assignment({}, {} {} {} {} {} {}, {})",
            self.id,
            self.date,
            self.course,
            self.group,
            self.teacher,
            self.room,
            self.slot,
            self.status
        )
    }
}

/// The resource family a conflict was detected on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConflictKind {
    Room,
    Teacher,
    Group,
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::Room => write!(f, "room"),
            ConflictKind::Teacher => write!(f, "teacher"),
            ConflictKind::Group => write!(f, "group"),
        }
    }
}

/// A recorded constraint violation, kept for manual review.
///
/// The engine records conflicts it finds outside the normal placement
/// flow (pre-existing inconsistencies in the assignment store) and
/// never resolves them itself; resolution belongs to the external
/// review workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    id: ConflictId,
    kind: ConflictKind,
    description: String,
    detected_at: NaiveDateTime,
    resolved: bool,
}

impl Conflict {
    #[inline]
    pub fn new(
        id: ConflictId,
        kind: ConflictKind,
        description: impl Into<String>,
        detected_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            kind,
            description: description.into(),
            detected_at,
            resolved: false,
        }
    }

    #[inline]
    pub fn id(&self) -> ConflictId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn detected_at(&self) -> NaiveDateTime {
        self.detected_at
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    #[inline]
    pub fn resolve(&mut self) {
        self.resolved = true;
    }
}

impl Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Conflict({}, {}: {})",
            self.id, self.kind, self.description
        )
    }
}
