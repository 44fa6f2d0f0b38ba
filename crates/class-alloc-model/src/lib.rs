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

//! # Class Allocation Model (`class-alloc-model`)
//!
//! Domain model for the class allocation engine, built on the
//! primitives of `class-alloc-core`.
//!
//! ## Key Data Structures
//!
//! - **[`catalog::Catalog`]**: the immutable inputs of a generation run
//!   (courses, groups, teachers, rooms, weekly time slots, availability
//!   records and course–group enrolments), assembled through a
//!   validating [`catalog::CatalogBuilder`].
//!
//! - **[`record::Assignment`]**: a committed placement of one session —
//!   date, course, group, teacher, room and time slot. Persists beyond
//!   the run that created it.
//!
//! - **[`record::Conflict`]**: a recorded constraint violation kept for
//!   manual review by the external resolution workflow.
//!
//! - **[`request::GenerationRequest`]** / **[`report::GenerationReport`]**:
//!   the wire payloads a caller exchanges with the engine. Field names
//!   on the wire follow the collaborator contract.
//!
//! - **[`generator::InstanceGenerator`]**: seeded synthetic catalogs for
//!   demos and tests, deterministic for a given seed.

pub mod catalog;
pub mod err;
pub mod generator;
pub mod id;
pub mod record;
pub mod report;
pub mod request;

pub mod prelude {
    pub use crate::catalog::{
        AvailabilityOverride, Catalog, CatalogBuilder, Course, CourseLevel, Enrolment, Group, Room,
        RoomKind, Teacher, TimeSlot, WeeklyAvailability,
    };
    pub use crate::err::{CatalogBuildError, ValidationError};
    pub use crate::id::{
        AssignmentId, ConflictId, CourseId, GroupId, RoomId, TeacherId, TimeSlotId,
    };
    pub use crate::record::{Assignment, AssignmentStatus, Conflict, ConflictKind};
    pub use crate::report::{FailedSession, GenerationReport, RunStatistics};
    pub use crate::request::{GenerationRequest, ScopeSet, ValidScope};
}
