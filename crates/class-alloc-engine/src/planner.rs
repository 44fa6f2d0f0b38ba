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

//! The core search and commit loop.
//!
//! Sessions are processed in the collector's fixed order; that order
//! is a correctness requirement, because a later session's feasibility
//! depends on what earlier sessions committed. For each session the
//! candidate space is scanned dates-ascending, slots in canonical
//! weekday/start order, rooms smallest-sufficient-first, and the first
//! feasible candidate is committed immediately so later sessions see
//! it. A session whose space is exhausted becomes a failure entry and
//! never aborts the run.

use crate::EngineError;
use crate::availability::AvailabilityIndex;
use crate::collector::{Session, collect_sessions};
use crate::config::EngineConfig;
use crate::feasibility::{Candidate, Violation, check_candidate, describe};
use crate::ledger::AssignmentLedger;
use crate::overwrite::stage_overwrite;
use crate::store::{AssignmentStore, ConflictStore, RunCommit};
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use class_alloc_core::calendar::DateRange;
use class_alloc_core::units::Headcount;
use class_alloc_model::catalog::{Catalog, Room, TimeSlot};
use class_alloc_model::id::{AssignmentId, CourseId, GroupId, TimeSlotId};
use class_alloc_model::record::Assignment;
use class_alloc_model::request::GenerationRequest;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Cooperative cancellation for one run.
///
/// Checked at every session boundary; when it trips, assignments
/// committed so far stand and a partial outcome is returned.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    deadline: Option<Instant>,
    cancel: Arc<AtomicBool>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Requests cancellation; clones observe it too.
    #[inline]
    pub fn request_cancel(&self) {
        self.cancel.store(true, AtomicOrdering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.cancel.load(AtomicOrdering::Relaxed)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// One session the planner could not place, with every constraint the
/// last examined candidate violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFailure {
    course: CourseId,
    group: GroupId,
    date: Option<NaiveDate>,
    slot: Option<TimeSlotId>,
    violations: Vec<Violation>,
}

impl SessionFailure {
    #[inline]
    pub fn new(
        course: CourseId,
        group: GroupId,
        date: Option<NaiveDate>,
        slot: Option<TimeSlotId>,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            course,
            group,
            date,
            slot,
            violations,
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
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    #[inline]
    pub fn slot(&self) -> Option<TimeSlotId> {
        self.slot
    }

    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Human-readable reason for the failure report.
    pub fn reason(&self) -> String {
        if self.violations.is_empty() {
            "no candidate date, slot or room in range".to_string()
        } else {
            describe(&self.violations)
        }
    }
}

/// What one generation run produced.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    committed: Vec<Assignment>,
    failures: Vec<SessionFailure>,
    conflicts: usize,
    cancelled: bool,
}

impl RunOutcome {
    #[inline]
    pub fn new(
        committed: Vec<Assignment>,
        failures: Vec<SessionFailure>,
        conflicts: usize,
        cancelled: bool,
    ) -> Self {
        Self {
            committed,
            failures,
            conflicts,
            cancelled,
        }
    }

    #[inline]
    pub fn committed(&self) -> &[Assignment] {
        &self.committed
    }

    #[inline]
    pub fn failures(&self) -> &[SessionFailure] {
        &self.failures
    }

    #[inline]
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Canonical slot ordering: weekday from Monday, then start time, then
/// id as the final tie-break.
pub fn slot_order(a: &TimeSlot, b: &TimeSlot) -> Ordering {
    a.weekday()
        .num_days_from_monday()
        .cmp(&b.weekday().num_days_from_monday())
        .then(a.window().cmp(&b.window()))
        .then(a.id().cmp(&b.id()))
}

/// Room ordering for a given group size: sufficient rooms by ascending
/// seat surplus (smallest sufficient room first, reserving large rooms
/// for larger groups), then insufficient rooms by ascending shortfall.
pub fn room_order(headcount: Headcount, a: &Room, b: &Room) -> Ordering {
    room_key(headcount, a).cmp(&room_key(headcount, b))
}

fn room_key(headcount: Headcount, room: &Room) -> (u8, u32, u64) {
    match room.capacity().surplus_over(headcount) {
        Some(surplus) => (0, surplus, room.id().value()),
        None => (
            1,
            headcount.value() - room.capacity().value(),
            room.id().value(),
        ),
    }
}

enum Placement {
    Committed(AssignmentId),
    Failed(SessionFailure),
}

/// Drives one generation run over an injected catalog and stores.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'c> {
    catalog: &'c Catalog,
    config: &'c EngineConfig,
}

impl<'c> Planner<'c> {
    #[inline]
    pub fn new(catalog: &'c Catalog, config: &'c EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Runs the full control flow: validate, load, stage overwrite,
    /// seed the ledger, collect sessions, place each one, then apply
    /// the run's single store commit.
    #[instrument(skip_all, fields(overwrite = request.overwrite()))]
    pub fn run<S, C>(
        &self,
        store: &mut S,
        conflicts: &mut C,
        request: &GenerationRequest,
        control: &RunControl,
    ) -> Result<RunOutcome, EngineError>
    where
        S: AssignmentStore,
        C: ConflictStore,
    {
        let scope = request.validate(self.catalog)?;
        let period = scope.period();
        let existing = store.load_range(&period)?;
        let staged = stage_overwrite(&existing, &scope);

        let (mut ledger, detected) = AssignmentLedger::seed(self.catalog, &existing, &staged);
        let detected_at = Utc::now().naive_utc();
        let mut conflict_count = 0usize;
        for conflict in detected {
            warn!(%conflict, "pre-existing inconsistency");
            conflicts.record(conflict, detected_at)?;
            conflict_count += 1;
        }

        let availability =
            AvailabilityIndex::build(self.catalog, self.config.availability_fallback());
        let sessions = collect_sessions(self.catalog, &scope, &ledger);
        info!(
            sessions = sessions.len(),
            staged_deletions = staged.len(),
            "collected sessions"
        );

        let mut slots_by_day: HashMap<Weekday, Vec<&TimeSlot>> = HashMap::new();
        for slot in self.catalog.iter_slots() {
            slots_by_day.entry(slot.weekday()).or_default().push(slot);
        }
        for slots in slots_by_day.values_mut() {
            slots.sort_by(|a, b| slot_order(a, b));
        }

        let mut failures = Vec::new();
        let mut cancelled = false;
        for session in &sessions {
            if control.should_stop() {
                info!("run cancelled; keeping commitments made so far");
                cancelled = true;
                break;
            }
            match self.place_session(session, period, &slots_by_day, &availability, &mut ledger) {
                Placement::Committed(id) => {
                    debug!(%session, %id, "session committed");
                }
                Placement::Failed(failure) => {
                    warn!(%session, reason = %failure.reason(), "session failed");
                    failures.push(failure);
                }
            }
        }

        let committed: Vec<Assignment> = ledger.iter_inserted().cloned().collect();
        let commit = RunCommit::new(staged.into_iter().collect(), committed.clone());
        store.apply(commit)?;

        info!(
            planned = committed.len(),
            failed = failures.len(),
            conflicts = conflict_count,
            "generation run finished"
        );
        Ok(RunOutcome::new(committed, failures, conflict_count, cancelled))
    }

    /// Scans the candidate space for one session and commits the first
    /// feasible placement.
    fn place_session(
        &self,
        session: &Session,
        period: DateRange,
        slots_by_day: &HashMap<Weekday, Vec<&TimeSlot>>,
        availability: &AvailabilityIndex,
        ledger: &mut AssignmentLedger,
    ) -> Placement {
        let course = self
            .catalog
            .course(session.course())
            .expect("sessions reference known courses");
        let group = self
            .catalog
            .group(session.group())
            .expect("sessions reference known groups");

        let mut rooms: Vec<&Room> = self
            .catalog
            .iter_rooms()
            .filter(|room| room.kind() == course.room_kind())
            .collect();
        rooms.sort_by(|a, b| room_order(group.headcount(), a, b));

        let mut last_candidate: Option<(NaiveDate, TimeSlotId)> = None;
        let mut last_violations: Vec<Violation> = Vec::new();

        for date in period.iter_days() {
            let Some(slots) = slots_by_day.get(&date.weekday()) else {
                continue;
            };
            for &slot in slots {
                for &room in &rooms {
                    let candidate = Candidate::new(date, slot, course, group, room);
                    let feasibility = check_candidate(ledger, availability, &candidate);
                    if feasibility.is_feasible() {
                        match ledger.commit(&candidate) {
                            Ok(id) => return Placement::Committed(id),
                            Err(rejected) => {
                                // Only reachable when a check raced a
                                // commit; sequential runs never hit it.
                                warn!(%candidate, %rejected, "stale feasibility at commit");
                                last_candidate = Some((date, slot.id()));
                                last_violations = rejected.into_violations();
                            }
                        }
                    } else {
                        last_candidate = Some((date, slot.id()));
                        last_violations = feasibility.into_violations();
                    }
                }
            }
        }

        Placement::Failed(SessionFailure::new(
            course.id(),
            group.id(),
            last_candidate.map(|(date, _)| date),
            last_candidate.map(|(_, slot)| slot),
            last_violations,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveTime;
    use class_alloc_core::time::TimeWindow;
    use class_alloc_core::units::{Capacity, Minutes};
    use class_alloc_model::catalog::{
        Course, CourseLevel, Enrolment, Group, RoomKind, Teacher, WeeklyAvailability,
    };
    use class_alloc_model::generator::{InstanceConfig, InstanceGenerator};
    use class_alloc_model::id::{RoomId, TeacherId};
    use class_alloc_model::record::AssignmentStatus;
    use class_alloc_model::request::ScopeSet;
    use std::collections::BTreeSet;

    const WEEK: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    fn d(day: u32) -> NaiveDate {
        // 2025-09-01 is a Monday.
        NaiveDate::from_ymd_opt(2025, 9, day).expect("valid date")
    }

    fn window(h0: u32, h1: u32) -> TimeWindow {
        TimeWindow::new(
            NaiveTime::from_hms_opt(h0, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(h1, 0, 0).expect("valid time"),
        )
        .expect("valid window")
    }

    /// One course (2h in 2h sessions), one group of 30, one room, one
    /// 08:00–10:00 slot per weekday over the working week.
    fn base_catalog(room_capacities: &[u32]) -> Catalog {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        for &day in WEEK.iter() {
            b.add_weekly_availability(WeeklyAvailability::new(
                TeacherId::new(1),
                day,
                window(8, 10),
            ))
            .unwrap();
        }
        b.add_course(Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(2),
            Minutes::from_hours(2),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(1),
        ))
        .unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(30)))
            .unwrap();
        for (i, &capacity) in room_capacities.iter().enumerate() {
            b.add_room(Room::new(
                RoomId::new(i as u64 + 1),
                format!("R{}", i + 1),
                Capacity::new(capacity),
                RoomKind::Lecture,
            ))
            .unwrap();
        }
        for (i, &day) in WEEK.iter().enumerate() {
            b.add_slot(TimeSlot::new(
                TimeSlotId::new(i as u64 + 1),
                day,
                window(8, 10),
            ))
            .unwrap();
        }
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        b.build()
    }

    fn request(overwrite: bool) -> GenerationRequest {
        GenerationRequest::new(d(1), d(5), ScopeSet::All, ScopeSet::All, overwrite)
    }

    fn run_engine(
        catalog: &Catalog,
        store: &mut MemoryStore,
        request: &GenerationRequest,
    ) -> RunOutcome {
        let config = EngineConfig::default();
        let mut conflicts = MemoryStore::new();
        Planner::new(catalog, &config)
            .run(store, &mut conflicts, request, &RunControl::new())
            .expect("run succeeds")
    }

    #[test]
    fn test_scenario_a_single_session_placed_on_earliest_candidate() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        let outcome = run_engine(&catalog, &mut store, &request(false));
        assert_eq!(outcome.committed().len(), 1);
        assert!(outcome.failures().is_empty());
        let placed = &outcome.committed()[0];
        assert_eq!(placed.date(), d(1));
        assert_eq!(placed.room(), RoomId::new(1));
        assert_eq!(placed.slot(), TimeSlotId::new(1));
        assert_eq!(placed.status(), AssignmentStatus::Planned);
        assert_eq!(store.iter_assignments().count(), 1);
    }

    #[test]
    fn test_scenario_b_too_small_room_fails_citing_capacity() {
        let catalog = base_catalog(&[20]);
        let mut store = MemoryStore::new();
        let outcome = run_engine(&catalog, &mut store, &request(false));
        assert!(outcome.committed().is_empty());
        assert_eq!(outcome.failures().len(), 1);
        let failure = &outcome.failures()[0];
        assert!(failure.reason().contains("seats 20"));
        // The last candidate examined was Friday's slot.
        assert_eq!(failure.date(), Some(d(5)));
        assert_eq!(failure.slot(), Some(TimeSlotId::new(5)));
        assert_eq!(store.iter_assignments().count(), 0);
    }

    #[test]
    fn test_scenario_c_competing_groups_fail_on_room_conflict() {
        // Two courses with distinct teachers, two groups, but a single
        // room and a single Monday slot.
        let mut b = Catalog::builder();
        for id in 1..=2u64 {
            b.add_teacher(Teacher::new(TeacherId::new(id), format!("T{id}")))
                .unwrap();
            b.add_weekly_availability(WeeklyAvailability::new(
                TeacherId::new(id),
                Weekday::Mon,
                window(8, 10),
            ))
            .unwrap();
            b.add_course(Course::new(
                CourseId::new(id),
                format!("C{id}"),
                Minutes::from_hours(2),
                Minutes::from_hours(2),
                CourseLevel::Introductory,
                RoomKind::Lecture,
                TeacherId::new(id),
            ))
            .unwrap();
            b.add_group(Group::new(GroupId::new(id), format!("G{id}"), Headcount::new(20)))
                .unwrap();
        }
        b.add_room(Room::new(
            RoomId::new(1),
            "R1",
            Capacity::new(30),
            RoomKind::Lecture,
        ))
        .unwrap();
        b.add_slot(TimeSlot::new(TimeSlotId::new(1), Weekday::Mon, window(8, 10)))
            .unwrap();
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        b.add_enrolment(Enrolment::new(CourseId::new(2), GroupId::new(2)))
            .unwrap();
        let catalog = b.build();

        let mut store = MemoryStore::new();
        let outcome = run_engine(
            &catalog,
            &mut store,
            &GenerationRequest::new(d(1), d(2), ScopeSet::All, ScopeSet::All, false),
        );
        assert_eq!(outcome.committed().len(), 1);
        assert_eq!(outcome.failures().len(), 1);
        let failure = &outcome.failures()[0];
        assert_eq!(failure.course(), CourseId::new(2));
        assert!(
            failure
                .violations()
                .iter()
                .all(|v| matches!(v, Violation::RoomOccupied { .. }))
        );
    }

    #[test]
    fn test_scenario_d_overwrite_deletes_then_recreates() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        store
            .insert(Assignment::new(
                AssignmentId::new(42),
                d(1),
                CourseId::new(1),
                GroupId::new(1),
                TeacherId::new(1),
                RoomId::new(1),
                TimeSlotId::new(1),
                AssignmentStatus::Planned,
            ))
            .unwrap();

        let outcome = run_engine(&catalog, &mut store, &request(true));
        assert_eq!(outcome.committed().len(), 1);
        assert!(outcome.failures().is_empty());
        let stored: Vec<_> = store.iter_assignments().collect();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].id(), AssignmentId::new(42));
        assert_eq!(stored[0].date(), d(1));
        assert_eq!(stored[0].room(), RoomId::new(1));
    }

    #[test]
    fn test_without_overwrite_covered_hours_produce_no_sessions() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        store
            .insert(Assignment::new(
                AssignmentId::new(42),
                d(1),
                CourseId::new(1),
                GroupId::new(1),
                TeacherId::new(1),
                RoomId::new(1),
                TimeSlotId::new(1),
                AssignmentStatus::Planned,
            ))
            .unwrap();

        let outcome = run_engine(&catalog, &mut store, &request(false));
        assert!(outcome.committed().is_empty());
        assert!(outcome.failures().is_empty());
        assert_eq!(store.iter_assignments().count(), 1);
        assert_eq!(
            store.iter_assignments().next().map(|a| a.id()),
            Some(AssignmentId::new(42))
        );
    }

    #[test]
    fn test_overwrite_runs_are_idempotent() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        for &day in WEEK.iter() {
            b.add_weekly_availability(WeeklyAvailability::new(
                TeacherId::new(1),
                day,
                window(8, 12),
            ))
            .unwrap();
        }
        b.add_course(Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(6),
            Minutes::from_hours(2),
            CourseLevel::Intermediate,
            RoomKind::Lecture,
            TeacherId::new(1),
        ))
        .unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(30)))
            .unwrap();
        b.add_room(Room::new(
            RoomId::new(1),
            "R1",
            Capacity::new(30),
            RoomKind::Lecture,
        ))
        .unwrap();
        let mut slot_id = 0u64;
        for &day in WEEK.iter() {
            for h in [8u32, 10] {
                slot_id += 1;
                b.add_slot(TimeSlot::new(
                    TimeSlotId::new(slot_id),
                    day,
                    window(h, h + 2),
                ))
                .unwrap();
            }
        }
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        let catalog = b.build();

        let mut store = MemoryStore::new();
        let first = run_engine(&catalog, &mut store, &request(true));
        let first_set: BTreeSet<_> = store
            .iter_assignments()
            .map(|a| (a.date(), a.course(), a.group(), a.room(), a.slot()))
            .collect();
        let second = run_engine(&catalog, &mut store, &request(true));
        let second_set: BTreeSet<_> = store
            .iter_assignments()
            .map(|a| (a.date(), a.course(), a.group(), a.room(), a.slot()))
            .collect();

        assert_eq!(first.committed().len(), second.committed().len());
        assert_eq!(first.failures().len(), second.failures().len());
        assert_eq!(first_set, second_set);
    }

    #[test]
    fn test_enlarging_room_pool_never_increases_failures() {
        let failures_with = |capacities: &[u32]| {
            let catalog = base_catalog(capacities);
            let mut store = MemoryStore::new();
            run_engine(&catalog, &mut store, &request(false))
                .failures()
                .len()
        };
        assert!(failures_with(&[20, 30]) <= failures_with(&[20]));
    }

    #[test]
    fn test_zero_required_hours_produce_no_session_and_no_counts() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(Course::new(
            CourseId::new(1),
            "C1",
            Minutes::zero(),
            Minutes::from_hours(2),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(1),
        ))
        .unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(30)))
            .unwrap();
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        let catalog = b.build();

        let mut store = MemoryStore::new();
        let outcome = run_engine(&catalog, &mut store, &request(false));
        assert!(outcome.committed().is_empty());
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn test_cancellation_returns_partial_outcome() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        let mut conflicts = MemoryStore::new();
        let config = EngineConfig::default();
        let control = RunControl::new();
        control.request_cancel();
        let outcome = Planner::new(&catalog, &config)
            .run(&mut store, &mut conflicts, &request(false), &control)
            .expect("run succeeds");
        assert!(outcome.is_cancelled());
        assert!(outcome.committed().is_empty());
        assert!(outcome.failures().is_empty());
    }

    #[test]
    fn test_elapsed_deadline_cancels_at_session_boundary() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        let mut conflicts = MemoryStore::new();
        let config = EngineConfig::default();
        let control = RunControl::new().with_deadline(Instant::now());
        let outcome = Planner::new(&catalog, &config)
            .run(&mut store, &mut conflicts, &request(false), &control)
            .expect("run succeeds");
        assert!(outcome.is_cancelled());
    }

    #[test]
    fn test_persistence_failure_aborts_without_partial_state() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        store.fail_next_apply();
        let mut conflicts = MemoryStore::new();
        let config = EngineConfig::default();
        let result = Planner::new(&catalog, &config).run(
            &mut store,
            &mut conflicts,
            &request(false),
            &RunControl::new(),
        );
        assert!(matches!(result, Err(EngineError::Persistence(_))));
        assert_eq!(store.iter_assignments().count(), 0);
    }

    #[test]
    fn test_malformed_request_rejected_before_any_work() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        let mut conflicts = MemoryStore::new();
        let config = EngineConfig::default();
        let inverted = GenerationRequest::new(d(5), d(1), ScopeSet::All, ScopeSet::All, false);
        let result = Planner::new(&catalog, &config).run(
            &mut store,
            &mut conflicts,
            &inverted,
            &RunControl::new(),
        );
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }

    #[test]
    fn test_preexisting_double_booking_recorded_and_run_continues() {
        let catalog = base_catalog(&[30]);
        let mut store = MemoryStore::new();
        for id in [10u64, 11] {
            store
                .insert(Assignment::new(
                    AssignmentId::new(id),
                    d(2),
                    CourseId::new(1),
                    GroupId::new(1),
                    TeacherId::new(1),
                    RoomId::new(1),
                    TimeSlotId::new(2),
                    AssignmentStatus::Planned,
                ))
                .unwrap();
        }
        let mut conflicts = MemoryStore::new();
        let config = EngineConfig::default();
        let outcome = Planner::new(&catalog, &config)
            .run(&mut store, &mut conflicts, &request(false), &RunControl::new())
            .expect("run succeeds");
        // Room, teacher and group each double-booked once.
        assert_eq!(outcome.conflicts(), 3);
        assert_eq!(conflicts.iter_conflicts().count(), 3);
    }

    #[test]
    fn test_invariants_hold_over_generated_instance() {
        let catalog = InstanceGenerator::new(InstanceConfig::default().with_seed(42)).generate();
        let mut store = MemoryStore::new();
        let outcome = run_engine(
            &catalog,
            &mut store,
            &GenerationRequest::new(d(1), d(12), ScopeSet::All, ScopeSet::All, false),
        );

        let mut rooms = BTreeSet::new();
        let mut teachers = BTreeSet::new();
        let mut groups = BTreeSet::new();
        for a in outcome.committed() {
            assert!(rooms.insert((a.room(), a.date(), a.slot())));
            assert!(teachers.insert((a.teacher(), a.date(), a.slot())));
            assert!(groups.insert((a.group(), a.date(), a.slot())));
            assert!(a.date() >= d(1) && a.date() <= d(12));
            assert_eq!(a.status(), AssignmentStatus::Planned);
            let room = catalog.room(a.room()).expect("room exists");
            let group = catalog.group(a.group()).expect("group exists");
            assert!(room.capacity().accommodates(group.headcount()));
            let course = catalog.course(a.course()).expect("course exists");
            assert_eq!(course.teacher(), a.teacher());
            assert_eq!(course.room_kind(), room.kind());
        }
    }
}
