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

//! The in-memory committed state of one generation run.
//!
//! The ledger owns the occupancy indexes the feasibility check reads:
//! per-room, per-teacher and per-group maps keyed by (resource, date,
//! slot). It is an explicit state object owned by the planner and
//! passed where needed, never process-wide state, so tests can inject
//! any committed state they like.
//!
//! [`AssignmentLedger::commit`] re-checks occupancy and inserts in one
//! step, so a feasibility check that went stale between check and
//! commit can never double-book a resource.

use crate::feasibility::{Candidate, Violation, describe};
use crate::store::DetectedConflict;
use chrono::NaiveDate;
use class_alloc_core::units::Minutes;
use class_alloc_model::catalog::Catalog;
use class_alloc_model::id::{AssignmentId, CourseId, GroupId, RoomId, TeacherId, TimeSlotId};
use class_alloc_model::record::{Assignment, AssignmentStatus, ConflictKind};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Display;

/// Error raised when the atomic re-check at commit time finds the
/// candidate's resources already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRejectedError {
    violations: Vec<Violation>,
}

impl CommitRejectedError {
    #[inline]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
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

impl Display for CommitRejectedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Commit rejected: {}", describe(&self.violations))
    }
}

impl std::error::Error for CommitRejectedError {}

/// Occupancy indexes plus the assignments backing them.
#[derive(Debug, Clone, Default)]
pub struct AssignmentLedger {
    assignments: BTreeMap<AssignmentId, Assignment>,
    room_busy: HashMap<(RoomId, NaiveDate, TimeSlotId), AssignmentId>,
    teacher_busy: HashMap<(TeacherId, NaiveDate, TimeSlotId), AssignmentId>,
    group_busy: HashMap<(GroupId, NaiveDate, TimeSlotId), AssignmentId>,
    covered: HashMap<(CourseId, GroupId), Minutes>,
    inserted: Vec<AssignmentId>,
    next_id: u64,
}

impl AssignmentLedger {
    /// Builds the ledger from the store's in-range assignments, minus
    /// the ids staged for overwrite deletion.
    ///
    /// Pre-existing inconsistencies surface here as [`DetectedConflict`]s
    /// instead of blocking the run: a double-booked resource keeps its
    /// first claimant in the index, and a room too small for its group
    /// is reported as a room conflict. Cancelled assignments occupy
    /// nothing.
    pub fn seed(
        catalog: &Catalog,
        existing: &[Assignment],
        exclude: &BTreeSet<AssignmentId>,
    ) -> (Self, Vec<DetectedConflict>) {
        let mut ledger = Self::default();
        let mut conflicts = Vec::new();

        for assignment in existing {
            ledger.next_id = ledger.next_id.max(assignment.id().value());
            if exclude.contains(&assignment.id()) {
                continue;
            }
            if assignment.is_occupying() {
                ledger.index(assignment, &mut conflicts);
                if let (Some(room), Some(group)) = (
                    catalog.room(assignment.room()),
                    catalog.group(assignment.group()),
                ) {
                    if !room.capacity().accommodates(group.headcount()) {
                        conflicts.push(DetectedConflict::new(
                            ConflictKind::Room,
                            format!(
                                "{} seats {} but {} counts {} in {}",
                                room.id(),
                                room.capacity().value(),
                                group.id(),
                                group.headcount().value(),
                                assignment.id()
                            ),
                        ));
                    }
                }
                let length = catalog
                    .slot(assignment.slot())
                    .map(|slot| slot.window().duration())
                    .or_else(|| {
                        catalog
                            .course(assignment.course())
                            .map(|course| course.session_length())
                    })
                    .unwrap_or_else(Minutes::zero);
                *ledger
                    .covered
                    .entry((assignment.course(), assignment.group()))
                    .or_default() += length;
            }
            ledger
                .assignments
                .insert(assignment.id(), assignment.clone());
        }

        (ledger, conflicts)
    }

    fn index(&mut self, assignment: &Assignment, conflicts: &mut Vec<DetectedConflict>) {
        let date = assignment.date();
        let slot = assignment.slot();
        let id = assignment.id();

        if let Some(&holder) = self.room_busy.get(&(assignment.room(), date, slot)) {
            conflicts.push(DetectedConflict::new(
                ConflictKind::Room,
                format!(
                    "{} is booked by both {} and {} on {} {}",
                    assignment.room(),
                    holder,
                    id,
                    date,
                    slot
                ),
            ));
        } else {
            self.room_busy.insert((assignment.room(), date, slot), id);
        }

        if let Some(&holder) = self.teacher_busy.get(&(assignment.teacher(), date, slot)) {
            conflicts.push(DetectedConflict::new(
                ConflictKind::Teacher,
                format!(
                    "{} is booked by both {} and {} on {} {}",
                    assignment.teacher(),
                    holder,
                    id,
                    date,
                    slot
                ),
            ));
        } else {
            self.teacher_busy
                .insert((assignment.teacher(), date, slot), id);
        }

        if let Some(&holder) = self.group_busy.get(&(assignment.group(), date, slot)) {
            conflicts.push(DetectedConflict::new(
                ConflictKind::Group,
                format!(
                    "{} is booked by both {} and {} on {} {}",
                    assignment.group(),
                    holder,
                    id,
                    date,
                    slot
                ),
            ));
        } else {
            self.group_busy.insert((assignment.group(), date, slot), id);
        }
    }

    #[inline]
    pub fn room_conflict(
        &self,
        room: RoomId,
        date: NaiveDate,
        slot: TimeSlotId,
    ) -> Option<AssignmentId> {
        self.room_busy.get(&(room, date, slot)).copied()
    }

    #[inline]
    pub fn teacher_conflict(
        &self,
        teacher: TeacherId,
        date: NaiveDate,
        slot: TimeSlotId,
    ) -> Option<AssignmentId> {
        self.teacher_busy.get(&(teacher, date, slot)).copied()
    }

    #[inline]
    pub fn group_conflict(
        &self,
        group: GroupId,
        date: NaiveDate,
        slot: TimeSlotId,
    ) -> Option<AssignmentId> {
        self.group_busy.get(&(group, date, slot)).copied()
    }

    /// Minutes already scheduled for a (course, group) pair by the
    /// assignments this ledger was seeded with or committed since.
    #[inline]
    pub fn covered_minutes(&self, course: CourseId, group: GroupId) -> Minutes {
        self.covered
            .get(&(course, group))
            .copied()
            .unwrap_or_else(Minutes::zero)
    }

    /// Re-checks occupancy and inserts the candidate as one step.
    ///
    /// The static checks (capacity, availability) are not repeated:
    /// they depend only on the catalog, which cannot change mid-run.
    pub fn commit(&mut self, candidate: &Candidate<'_>) -> Result<AssignmentId, CommitRejectedError> {
        let date = candidate.date();
        let slot = candidate.slot().id();
        let mut violations = Vec::new();

        if let Some(by) = self.room_conflict(candidate.room().id(), date, slot) {
            violations.push(Violation::RoomOccupied {
                room: candidate.room().id(),
                by,
            });
        }
        if let Some(by) = self.teacher_conflict(candidate.teacher(), date, slot) {
            violations.push(Violation::TeacherOccupied {
                teacher: candidate.teacher(),
                by,
            });
        }
        if let Some(by) = self.group_conflict(candidate.group().id(), date, slot) {
            violations.push(Violation::GroupOccupied {
                group: candidate.group().id(),
                by,
            });
        }
        if !violations.is_empty() {
            return Err(CommitRejectedError::new(violations));
        }

        self.next_id += 1;
        let id = AssignmentId::new(self.next_id);
        let assignment = Assignment::new(
            id,
            date,
            candidate.course().id(),
            candidate.group().id(),
            candidate.teacher(),
            candidate.room().id(),
            slot,
            AssignmentStatus::Planned,
        );

        self.room_busy.insert((candidate.room().id(), date, slot), id);
        self.teacher_busy
            .insert((candidate.teacher(), date, slot), id);
        self.group_busy
            .insert((candidate.group().id(), date, slot), id);
        *self
            .covered
            .entry((candidate.course().id(), candidate.group().id()))
            .or_default() += candidate.slot().window().duration();
        self.assignments.insert(id, assignment);
        self.inserted.push(id);

        Ok(id)
    }

    pub fn iter_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }

    /// Assignments committed by this run, in commit order.
    pub fn iter_inserted(&self) -> impl Iterator<Item = &Assignment> {
        self.inserted
            .iter()
            .map(|id| &self.assignments[id])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use class_alloc_core::time::TimeWindow;
    use class_alloc_core::units::{Capacity, Headcount};
    use class_alloc_model::catalog::{
        Course, CourseLevel, Group, Room, RoomKind, Teacher, TimeSlot,
    };

    fn window(h0: u32, h1: u32) -> TimeWindow {
        TimeWindow::new(
            NaiveTime::from_hms_opt(h0, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(h1, 0, 0).expect("valid time"),
        )
        .expect("valid window")
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date")
    }

    fn catalog(room_capacity: u32) -> Catalog {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(4),
            Minutes::from_hours(2),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(1),
        ))
        .unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(30)))
            .unwrap();
        b.add_room(Room::new(
            RoomId::new(1),
            "R1",
            Capacity::new(room_capacity),
            RoomKind::Lecture,
        ))
        .unwrap();
        b.add_slot(TimeSlot::new(TimeSlotId::new(1), Weekday::Mon, window(8, 10)))
            .unwrap();
        b.build()
    }

    fn existing(id: u64) -> Assignment {
        Assignment::new(
            AssignmentId::new(id),
            monday(),
            CourseId::new(1),
            GroupId::new(1),
            TeacherId::new(1),
            RoomId::new(1),
            TimeSlotId::new(1),
            AssignmentStatus::Planned,
        )
    }

    fn candidate(catalog: &Catalog) -> Candidate<'_> {
        Candidate::new(
            monday(),
            catalog.slot(TimeSlotId::new(1)).expect("slot exists"),
            catalog.course(CourseId::new(1)).expect("course exists"),
            catalog.group(GroupId::new(1)).expect("group exists"),
            catalog.room(RoomId::new(1)).expect("room exists"),
        )
    }

    #[test]
    fn test_seed_indexes_occupying_assignments() {
        let catalog = catalog(30);
        let (ledger, conflicts) =
            AssignmentLedger::seed(&catalog, &[existing(1)], &BTreeSet::new());
        assert!(conflicts.is_empty());
        assert!(
            ledger
                .room_conflict(RoomId::new(1), monday(), TimeSlotId::new(1))
                .is_some()
        );
        assert_eq!(
            ledger.covered_minutes(CourseId::new(1), GroupId::new(1)),
            Minutes::from_hours(2)
        );
    }

    #[test]
    fn test_seed_skips_excluded_and_cancelled() {
        let catalog = catalog(30);
        let cancelled = Assignment::new(
            AssignmentId::new(2),
            monday(),
            CourseId::new(1),
            GroupId::new(1),
            TeacherId::new(1),
            RoomId::new(1),
            TimeSlotId::new(1),
            AssignmentStatus::Cancelled,
        );
        let excluded: BTreeSet<_> = [AssignmentId::new(1)].into();
        let (ledger, conflicts) =
            AssignmentLedger::seed(&catalog, &[existing(1), cancelled], &excluded);
        assert!(conflicts.is_empty());
        assert!(
            ledger
                .room_conflict(RoomId::new(1), monday(), TimeSlotId::new(1))
                .is_none()
        );
        assert_eq!(
            ledger.covered_minutes(CourseId::new(1), GroupId::new(1)),
            Minutes::zero()
        );
    }

    #[test]
    fn test_seed_reports_preexisting_double_booking() {
        let catalog = catalog(30);
        let (ledger, conflicts) =
            AssignmentLedger::seed(&catalog, &[existing(1), existing(2)], &BTreeSet::new());
        // Same room, teacher and group: three conflicts, first claimant
        // keeps the index.
        assert_eq!(conflicts.len(), 3);
        let kinds: Vec<_> = conflicts.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![
            ConflictKind::Room,
            ConflictKind::Teacher,
            ConflictKind::Group,
        ]);
        assert_eq!(
            ledger.room_conflict(RoomId::new(1), monday(), TimeSlotId::new(1)),
            Some(AssignmentId::new(1))
        );
    }

    #[test]
    fn test_seed_reports_preexisting_capacity_violation() {
        let catalog = catalog(20);
        let (_, conflicts) = AssignmentLedger::seed(&catalog, &[existing(1)], &BTreeSet::new());
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind(), ConflictKind::Room);
        assert!(conflicts[0].description().contains("seats 20"));
    }

    #[test]
    fn test_commit_updates_indexes_and_covered_minutes() {
        let catalog = catalog(30);
        let (mut ledger, _) = AssignmentLedger::seed(&catalog, &[], &BTreeSet::new());
        let id = ledger.commit(&candidate(&catalog)).expect("commit succeeds");
        assert_eq!(
            ledger.room_conflict(RoomId::new(1), monday(), TimeSlotId::new(1)),
            Some(id)
        );
        assert_eq!(
            ledger.covered_minutes(CourseId::new(1), GroupId::new(1)),
            Minutes::from_hours(2)
        );
        assert_eq!(ledger.iter_inserted().count(), 1);
    }

    #[test]
    fn test_second_commit_on_same_slot_rejected() {
        let catalog = catalog(30);
        let (mut ledger, _) = AssignmentLedger::seed(&catalog, &[], &BTreeSet::new());
        ledger.commit(&candidate(&catalog)).expect("first commit");
        let rejected = ledger
            .commit(&candidate(&catalog))
            .expect_err("second commit must be rejected");
        assert_eq!(rejected.violations().len(), 3);
        assert_eq!(ledger.iter_inserted().count(), 1);
    }

    #[test]
    fn test_commit_ids_continue_after_seeded_ids() {
        let catalog = catalog(30);
        let later = Assignment::new(
            AssignmentId::new(7),
            monday().succ_opt().expect("valid date"),
            CourseId::new(1),
            GroupId::new(1),
            TeacherId::new(1),
            RoomId::new(1),
            TimeSlotId::new(1),
            AssignmentStatus::Planned,
        );
        let (mut ledger, _) = AssignmentLedger::seed(&catalog, &[later], &BTreeSet::new());
        let id = ledger.commit(&candidate(&catalog)).expect("commit succeeds");
        assert_eq!(id, AssignmentId::new(8));
    }
}
