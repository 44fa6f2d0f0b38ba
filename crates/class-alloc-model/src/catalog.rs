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

//! The immutable inputs of a generation run.
//!
//! A [`Catalog`] is assembled once through a [`CatalogBuilder`], which
//! rejects duplicate ids and dangling references at insertion time, so
//! that the engine can assume referential integrity throughout a run.

use crate::err::{
    CatalogBuildError, DuplicateEnrolmentError, DuplicateIdError, EntityKind, UnknownCourseError,
    UnknownGroupError, UnknownTeacherError, ZeroCapacityRoomError, ZeroSessionLengthError,
};
use crate::id::{CourseId, GroupId, RoomId, TeacherId, TimeSlotId};
use chrono::Weekday;
use class_alloc_core::calendar::DateRange;
use class_alloc_core::time::TimeWindow;
use class_alloc_core::units::{Capacity, Headcount, Minutes};
use std::collections::BTreeMap;
use std::fmt::Display;

/// The category of room a course must be taught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomKind {
    Lecture,
    Seminar,
    Lab,
    Amphitheater,
}

impl Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomKind::Lecture => write!(f, "lecture"),
            RoomKind::Seminar => write!(f, "seminar"),
            RoomKind::Lab => write!(f, "lab"),
            RoomKind::Amphitheater => write!(f, "amphitheater"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CourseLevel {
    Introductory,
    Intermediate,
    Advanced,
}

impl Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseLevel::Introductory => write!(f, "introductory"),
            CourseLevel::Intermediate => write!(f, "intermediate"),
            CourseLevel::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    id: TeacherId,
    label: String,
}

impl Teacher {
    #[inline]
    pub fn new(id: TeacherId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> TeacherId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A course to be taught, bound to its lecturer and room category.
///
/// `required_hours` is the total teaching load over the planning
/// horizon; the engine expands it into sessions of `session_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    label: String,
    required_hours: Minutes,
    session_length: Minutes,
    level: CourseLevel,
    room_kind: RoomKind,
    teacher: TeacherId,
}

impl Course {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        id: CourseId,
        label: impl Into<String>,
        required_hours: Minutes,
        session_length: Minutes,
        level: CourseLevel,
        room_kind: RoomKind,
        teacher: TeacherId,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            required_hours,
            session_length,
            level,
            room_kind,
            teacher,
        }
    }

    #[inline]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn required_hours(&self) -> Minutes {
        self.required_hours
    }

    #[inline]
    pub fn session_length(&self) -> Minutes {
        self.session_length
    }

    #[inline]
    pub fn level(&self) -> CourseLevel {
        self.level
    }

    #[inline]
    pub fn room_kind(&self) -> RoomKind {
        self.room_kind
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    /// Sessions needed to cover the full required load from scratch.
    #[inline]
    pub fn session_count(&self) -> u32 {
        self.required_hours.div_ceil(self.session_length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    id: GroupId,
    label: String,
    headcount: Headcount,
}

impl Group {
    #[inline]
    pub fn new(id: GroupId, label: impl Into<String>, headcount: Headcount) -> Self {
        Self {
            id,
            label: label.into(),
            headcount,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn headcount(&self) -> Headcount {
        self.headcount
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    label: String,
    capacity: Capacity,
    kind: RoomKind,
}

impl Room {
    #[inline]
    pub fn new(id: RoomId, label: impl Into<String>, capacity: Capacity, kind: RoomKind) -> Self {
        Self {
            id,
            label: label.into(),
            capacity,
            kind,
        }
    }

    #[inline]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[inline]
    pub fn kind(&self) -> RoomKind {
        self.kind
    }
}

/// A recurring weekly teaching window: weekday plus time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    id: TimeSlotId,
    weekday: Weekday,
    window: TimeWindow,
}

impl TimeSlot {
    #[inline]
    pub fn new(id: TimeSlotId, weekday: Weekday, window: TimeWindow) -> Self {
        Self {
            id,
            weekday,
            window,
        }
    }

    #[inline]
    pub fn id(&self) -> TimeSlotId {
        self.id
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    #[inline]
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeSlot({}, {} {})", self.id, self.weekday, self.window)
    }
}

/// A default availability window recurring every week for one teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyAvailability {
    teacher: TeacherId,
    weekday: Weekday,
    window: TimeWindow,
}

impl WeeklyAvailability {
    #[inline]
    pub fn new(teacher: TeacherId, weekday: Weekday, window: TimeWindow) -> Self {
        Self {
            teacher,
            weekday,
            window,
        }
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    #[inline]
    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

/// A date-bounded exception to a teacher's weekly availability.
///
/// Overrides win over weekly defaults on every date of `period`. A
/// `None` window covers the whole day; otherwise the override applies
/// to slots overlapping the window. When several overrides cover the
/// same date, the one added last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityOverride {
    teacher: TeacherId,
    period: DateRange,
    window: Option<TimeWindow>,
    available: bool,
}

impl AvailabilityOverride {
    /// A blackout: the teacher is unavailable over `period`.
    #[inline]
    pub fn blackout(teacher: TeacherId, period: DateRange) -> Self {
        Self {
            teacher,
            period,
            window: None,
            available: false,
        }
    }

    #[inline]
    pub fn new(
        teacher: TeacherId,
        period: DateRange,
        window: Option<TimeWindow>,
        available: bool,
    ) -> Self {
        Self {
            teacher,
            period,
            window,
            available,
        }
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    #[inline]
    pub fn period(&self) -> DateRange {
        self.period
    }

    #[inline]
    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    #[inline]
    pub fn available(&self) -> bool {
        self.available
    }
}

/// A (course, group) pair that must be taught.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Enrolment {
    course: CourseId,
    group: GroupId,
}

impl Enrolment {
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

/// The complete, referentially consistent input set of a run.
///
/// Entity maps are ordered by id so that every iteration over the
/// catalog is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    courses: BTreeMap<CourseId, Course>,
    groups: BTreeMap<GroupId, Group>,
    teachers: BTreeMap<TeacherId, Teacher>,
    rooms: BTreeMap<RoomId, Room>,
    slots: BTreeMap<TimeSlotId, TimeSlot>,
    weekly: Vec<WeeklyAvailability>,
    overrides: Vec<AvailabilityOverride>,
    enrolments: Vec<Enrolment>,
}

impl Catalog {
    #[inline]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    #[inline]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    #[inline]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    #[inline]
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.get(&id)
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    #[inline]
    pub fn slot(&self, id: TimeSlotId) -> Option<&TimeSlot> {
        self.slots.get(&id)
    }

    pub fn iter_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn iter_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn iter_teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.values()
    }

    pub fn iter_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn iter_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.values()
    }

    #[inline]
    pub fn weekly_availability(&self) -> &[WeeklyAvailability] {
        &self.weekly
    }

    #[inline]
    pub fn availability_overrides(&self) -> &[AvailabilityOverride] {
        &self.overrides
    }

    #[inline]
    pub fn enrolments(&self) -> &[Enrolment] {
        &self.enrolments
    }
}

/// Builds a [`Catalog`], validating every insertion.
///
/// Referenced entities must be added before their referents: teachers
/// before the courses they teach, courses and groups before their
/// enrolments.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_teacher(&mut self, teacher: Teacher) -> Result<&mut Self, CatalogBuildError> {
        let id = teacher.id();
        if self.catalog.teachers.contains_key(&id) {
            return Err(CatalogBuildError::DuplicateId(DuplicateIdError::new(
                EntityKind::Teacher,
                id.value(),
            )));
        }
        self.catalog.teachers.insert(id, teacher);
        Ok(self)
    }

    pub fn add_course(&mut self, course: Course) -> Result<&mut Self, CatalogBuildError> {
        let id = course.id();
        if self.catalog.courses.contains_key(&id) {
            return Err(CatalogBuildError::DuplicateId(DuplicateIdError::new(
                EntityKind::Course,
                id.value(),
            )));
        }
        if !self.catalog.teachers.contains_key(&course.teacher()) {
            return Err(CatalogBuildError::UnknownTeacher(UnknownTeacherError::new(
                course.teacher(),
            )));
        }
        if course.session_length().is_zero() {
            return Err(CatalogBuildError::ZeroSessionLength(
                ZeroSessionLengthError::new(id),
            ));
        }
        self.catalog.courses.insert(id, course);
        Ok(self)
    }

    pub fn add_group(&mut self, group: Group) -> Result<&mut Self, CatalogBuildError> {
        let id = group.id();
        if self.catalog.groups.contains_key(&id) {
            return Err(CatalogBuildError::DuplicateId(DuplicateIdError::new(
                EntityKind::Group,
                id.value(),
            )));
        }
        self.catalog.groups.insert(id, group);
        Ok(self)
    }

    pub fn add_room(&mut self, room: Room) -> Result<&mut Self, CatalogBuildError> {
        let id = room.id();
        if self.catalog.rooms.contains_key(&id) {
            return Err(CatalogBuildError::DuplicateId(DuplicateIdError::new(
                EntityKind::Room,
                id.value(),
            )));
        }
        if room.capacity().value() == 0 {
            return Err(CatalogBuildError::ZeroCapacityRoom(
                ZeroCapacityRoomError::new(id),
            ));
        }
        self.catalog.rooms.insert(id, room);
        Ok(self)
    }

    pub fn add_slot(&mut self, slot: TimeSlot) -> Result<&mut Self, CatalogBuildError> {
        let id = slot.id();
        if self.catalog.slots.contains_key(&id) {
            return Err(CatalogBuildError::DuplicateId(DuplicateIdError::new(
                EntityKind::TimeSlot,
                id.value(),
            )));
        }
        self.catalog.slots.insert(id, slot);
        Ok(self)
    }

    pub fn add_weekly_availability(
        &mut self,
        availability: WeeklyAvailability,
    ) -> Result<&mut Self, CatalogBuildError> {
        if !self.catalog.teachers.contains_key(&availability.teacher()) {
            return Err(CatalogBuildError::UnknownTeacher(UnknownTeacherError::new(
                availability.teacher(),
            )));
        }
        self.catalog.weekly.push(availability);
        Ok(self)
    }

    pub fn add_availability_override(
        &mut self,
        exception: AvailabilityOverride,
    ) -> Result<&mut Self, CatalogBuildError> {
        if !self.catalog.teachers.contains_key(&exception.teacher()) {
            return Err(CatalogBuildError::UnknownTeacher(UnknownTeacherError::new(
                exception.teacher(),
            )));
        }
        self.catalog.overrides.push(exception);
        Ok(self)
    }

    pub fn add_enrolment(&mut self, enrolment: Enrolment) -> Result<&mut Self, CatalogBuildError> {
        if !self.catalog.courses.contains_key(&enrolment.course()) {
            return Err(CatalogBuildError::UnknownCourse(UnknownCourseError::new(
                enrolment.course(),
            )));
        }
        if !self.catalog.groups.contains_key(&enrolment.group()) {
            return Err(CatalogBuildError::UnknownGroup(UnknownGroupError::new(
                enrolment.group(),
            )));
        }
        if self.catalog.enrolments.contains(&enrolment) {
            return Err(CatalogBuildError::DuplicateEnrolment(
                DuplicateEnrolmentError::new(enrolment.course(), enrolment.group()),
            ));
        }
        self.catalog.enrolments.push(enrolment);
        Ok(self)
    }

    pub fn build(&self) -> Catalog {
        self.catalog.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn window(h0: u32, h1: u32) -> TimeWindow {
        TimeWindow::new(
            NaiveTime::from_hms_opt(h0, 0, 0).expect("valid time"),
            NaiveTime::from_hms_opt(h1, 0, 0).expect("valid time"),
        )
        .expect("valid window")
    }

    fn course(id: u64, teacher: u64) -> Course {
        Course::new(
            CourseId::new(id),
            format!("C{id}"),
            Minutes::from_hours(4),
            Minutes::from_hours(2),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(teacher),
        )
    }

    #[test]
    fn test_duplicate_course_rejected() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(course(1, 1)).unwrap();
        assert!(matches!(
            b.add_course(course(1, 1)),
            Err(CatalogBuildError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_course_with_unknown_teacher_rejected() {
        let mut b = Catalog::builder();
        assert!(matches!(
            b.add_course(course(1, 9)),
            Err(CatalogBuildError::UnknownTeacher(_))
        ));
    }

    #[test]
    fn test_zero_session_length_rejected() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        let degenerate = Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(4),
            Minutes::zero(),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(1),
        );
        assert!(matches!(
            b.add_course(degenerate),
            Err(CatalogBuildError::ZeroSessionLength(_))
        ));
    }

    #[test]
    fn test_zero_capacity_room_rejected() {
        let mut b = Catalog::builder();
        let room = Room::new(RoomId::new(1), "R1", Capacity::new(0), RoomKind::Lecture);
        assert!(matches!(
            b.add_room(room),
            Err(CatalogBuildError::ZeroCapacityRoom(_))
        ));
    }

    #[test]
    fn test_enrolment_requires_known_course_and_group() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(course(1, 1)).unwrap();
        assert!(matches!(
            b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(7))),
            Err(CatalogBuildError::UnknownGroup(_))
        ));
        assert!(matches!(
            b.add_enrolment(Enrolment::new(CourseId::new(9), GroupId::new(7))),
            Err(CatalogBuildError::UnknownCourse(_))
        ));
    }

    #[test]
    fn test_duplicate_enrolment_rejected() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(course(1, 1)).unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(25)))
            .unwrap();
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        assert!(matches!(
            b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1))),
            Err(CatalogBuildError::DuplicateEnrolment(_))
        ));
    }

    #[test]
    fn test_session_count_rounds_up() {
        let c = Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(3),
            Minutes::from_hours(2),
            CourseLevel::Advanced,
            RoomKind::Lab,
            TeacherId::new(1),
        );
        assert_eq!(c.session_count(), 2);
    }

    #[test]
    fn test_build_ok_when_valid() {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(course(1, 1)).unwrap();
        b.add_group(Group::new(GroupId::new(1), "G1", Headcount::new(25)))
            .unwrap();
        b.add_room(Room::new(
            RoomId::new(1),
            "R1",
            Capacity::new(30),
            RoomKind::Lecture,
        ))
        .unwrap();
        b.add_slot(TimeSlot::new(TimeSlotId::new(1), Weekday::Mon, window(8, 10)))
            .unwrap();
        b.add_weekly_availability(WeeklyAvailability::new(
            TeacherId::new(1),
            Weekday::Mon,
            window(8, 12),
        ))
        .unwrap();
        b.add_enrolment(Enrolment::new(CourseId::new(1), GroupId::new(1)))
            .unwrap();
        let catalog = b.build();
        assert_eq!(catalog.iter_courses().count(), 1);
        assert_eq!(catalog.enrolments().len(), 1);
        assert!(catalog.course(CourseId::new(1)).is_some());
    }
}
