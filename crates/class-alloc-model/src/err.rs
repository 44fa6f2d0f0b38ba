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

use crate::id::{CourseId, GroupId, RoomId, TeacherId};
use chrono::NaiveDate;
use std::fmt::Display;

/// Which entity family an offending id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Course,
    Group,
    Teacher,
    Room,
    TimeSlot,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Course => write!(f, "course"),
            EntityKind::Group => write!(f, "group"),
            EntityKind::Teacher => write!(f, "teacher"),
            EntityKind::Room => write!(f, "room"),
            EntityKind::TimeSlot => write!(f, "time slot"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateIdError {
    kind: EntityKind,
    id: u64,
}

impl DuplicateIdError {
    #[inline]
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Display for DuplicateIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate {} id {}", self.kind, self.id)
    }
}

impl std::error::Error for DuplicateIdError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownTeacherError {
    id: TeacherId,
}

impl UnknownTeacherError {
    #[inline]
    pub fn new(id: TeacherId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> TeacherId {
        self.id
    }
}

impl Display for UnknownTeacherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown teacher {}", self.id)
    }
}

impl std::error::Error for UnknownTeacherError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownCourseError {
    id: CourseId,
}

impl UnknownCourseError {
    #[inline]
    pub fn new(id: CourseId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> CourseId {
        self.id
    }
}

impl Display for UnknownCourseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown course {}", self.id)
    }
}

impl std::error::Error for UnknownCourseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownGroupError {
    id: GroupId,
}

impl UnknownGroupError {
    #[inline]
    pub fn new(id: GroupId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }
}

impl Display for UnknownGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown group {}", self.id)
    }
}

impl std::error::Error for UnknownGroupError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroCapacityRoomError {
    id: RoomId,
}

impl ZeroCapacityRoomError {
    #[inline]
    pub fn new(id: RoomId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> RoomId {
        self.id
    }
}

impl Display for ZeroCapacityRoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room {} has zero capacity", self.id)
    }
}

impl std::error::Error for ZeroCapacityRoomError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSessionLengthError {
    id: CourseId,
}

impl ZeroSessionLengthError {
    #[inline]
    pub fn new(id: CourseId) -> Self {
        Self { id }
    }

    #[inline]
    pub fn id(&self) -> CourseId {
        self.id
    }
}

impl Display for ZeroSessionLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Course {} has a zero-length session", self.id)
    }
}

impl std::error::Error for ZeroSessionLengthError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateEnrolmentError {
    course: CourseId,
    group: GroupId,
}

impl DuplicateEnrolmentError {
    #[inline]
    pub fn new(course: CourseId, group: GroupId) -> Self {
        Self { course, group }
    }

    #[inline]
    pub fn course(&self) -> CourseId {
        self.course
    }

    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }
}

impl Display for DuplicateEnrolmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Enrolment of {} into {} was added twice",
            self.group, self.course
        )
    }
}

impl std::error::Error for DuplicateEnrolmentError {}

/// Errors raised while assembling a [`crate::catalog::Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogBuildError {
    DuplicateId(DuplicateIdError),
    UnknownTeacher(UnknownTeacherError),
    UnknownCourse(UnknownCourseError),
    UnknownGroup(UnknownGroupError),
    ZeroCapacityRoom(ZeroCapacityRoomError),
    ZeroSessionLength(ZeroSessionLengthError),
    DuplicateEnrolment(DuplicateEnrolmentError),
}

impl Display for CatalogBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogBuildError::DuplicateId(e) => write!(f, "{e}"),
            CatalogBuildError::UnknownTeacher(e) => write!(f, "{e}"),
            CatalogBuildError::UnknownCourse(e) => write!(f, "{e}"),
            CatalogBuildError::UnknownGroup(e) => write!(f, "{e}"),
            CatalogBuildError::ZeroCapacityRoom(e) => write!(f, "{e}"),
            CatalogBuildError::ZeroSessionLength(e) => write!(f, "{e}"),
            CatalogBuildError::DuplicateEnrolment(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CatalogBuildError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodOrderError {
    start: NaiveDate,
    end: NaiveDate,
}

impl PeriodOrderError {
    #[inline]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl Display for PeriodOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation period start {} must precede end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for PeriodOrderError {}

/// Errors raised when a [`crate::request::GenerationRequest`] is
/// malformed. Surfaced before any planning work is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    PeriodOrder(PeriodOrderError),
    UnknownCourse(UnknownCourseError),
    UnknownGroup(UnknownGroupError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::PeriodOrder(e) => write!(f, "{e}"),
            ValidationError::UnknownCourse(e) => write!(f, "{e}"),
            ValidationError::UnknownGroup(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ValidationError {}
