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

//! Seeded synthetic catalog generation for demos and tests.
//!
//! A [`ChaCha12Rng`] keeps instances reproducible across platforms for
//! a given seed.

mod config;

pub use config::InstanceConfig;

use crate::catalog::{
    Catalog, Course, CourseLevel, Enrolment, Group, Room, RoomKind, Teacher, TimeSlot,
    WeeklyAvailability,
};
use crate::id::{CourseId, GroupId, RoomId, TeacherId, TimeSlotId};
use chrono::{Duration, Weekday};
use class_alloc_core::time::TimeWindow;
use class_alloc_core::units::{Capacity, Headcount, Minutes};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::collections::BTreeSet;

const TEACHING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

const ROOM_KINDS: [RoomKind; 4] = [
    RoomKind::Lecture,
    RoomKind::Seminar,
    RoomKind::Lab,
    RoomKind::Amphitheater,
];

const COURSE_LEVELS: [CourseLevel; 3] = [
    CourseLevel::Introductory,
    CourseLevel::Intermediate,
    CourseLevel::Advanced,
];

pub struct InstanceGenerator {
    config: InstanceConfig,
    rng: ChaCha12Rng,
}

impl From<InstanceConfig> for InstanceGenerator {
    fn from(config: InstanceConfig) -> Self {
        Self::new(config)
    }
}

impl InstanceGenerator {
    pub fn new(config: InstanceConfig) -> Self {
        let seed = config.seed();
        Self {
            config,
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }

    /// Produces a referentially consistent catalog.
    ///
    /// Room kinds cycle through all four categories before repeating,
    /// so every course can find at least one room of its kind whenever
    /// `rooms >= 4`.
    pub fn generate(&mut self) -> Catalog {
        let mut builder = Catalog::builder();

        for i in 0..self.config.teachers {
            let id = TeacherId::new(i as u64 + 1);
            builder
                .add_teacher(Teacher::new(id, format!("Teacher {}", i + 1)))
                .expect("generator emits unique teacher ids");
        }

        let mut slot_id = 0u64;
        let mut windows = Vec::with_capacity(self.config.slots_per_day);
        for i in 0..self.config.slots_per_day {
            let offset = Duration::minutes((self.config.slot_length.value() * i as u32) as i64);
            let start = self.config.day_start + offset;
            let end = start + Duration::minutes(self.config.slot_length.value() as i64);
            windows.push(TimeWindow::new(start, end).expect("slot grid windows are non-empty"));
        }
        for &day in TEACHING_DAYS.iter() {
            for &window in windows.iter() {
                slot_id += 1;
                builder
                    .add_slot(TimeSlot::new(TimeSlotId::new(slot_id), day, window))
                    .expect("generator emits unique slot ids");
            }
        }

        for i in 0..self.config.teachers {
            let teacher = TeacherId::new(i as u64 + 1);
            for &day in TEACHING_DAYS.iter() {
                for &window in windows.iter() {
                    if self.rng.random_bool(self.config.availability_density) {
                        builder
                            .add_weekly_availability(WeeklyAvailability::new(
                                teacher, day, window,
                            ))
                            .expect("teacher was added above");
                    }
                }
            }
        }

        for i in 0..self.config.rooms {
            let id = RoomId::new(i as u64 + 1);
            let capacity = self
                .rng
                .random_range(self.config.min_capacity..=self.config.max_capacity);
            let kind = ROOM_KINDS[i % ROOM_KINDS.len()];
            builder
                .add_room(Room::new(
                    id,
                    format!("Room {}", i + 1),
                    Capacity::new(capacity),
                    kind,
                ))
                .expect("generator emits unique room ids and non-zero capacities");
        }

        for i in 0..self.config.groups {
            let id = GroupId::new(i as u64 + 1);
            let headcount = self
                .rng
                .random_range(self.config.min_headcount..=self.config.max_headcount);
            builder
                .add_group(Group::new(
                    id,
                    format!("Group {}", i + 1),
                    Headcount::new(headcount),
                ))
                .expect("generator emits unique group ids");
        }

        for i in 0..self.config.courses {
            let id = CourseId::new(i as u64 + 1);
            let hours = self
                .rng
                .random_range(self.config.min_required_hours..=self.config.max_required_hours);
            let teacher = TeacherId::new(self.rng.random_range(1..=self.config.teachers as u64));
            let kind = ROOM_KINDS[self.rng.random_range(0..ROOM_KINDS.len())];
            let level = COURSE_LEVELS[self.rng.random_range(0..COURSE_LEVELS.len())];
            builder
                .add_course(Course::new(
                    id,
                    format!("Course {}", i + 1),
                    Minutes::from_hours(hours),
                    Minutes::from_hours(self.config.session_hours),
                    level,
                    kind,
                    teacher,
                ))
                .expect("generator references teachers added above");

            let wanted = self
                .rng
                .random_range(1..=self.config.max_groups_per_course.min(self.config.groups));
            let mut chosen: BTreeSet<GroupId> = BTreeSet::new();
            while chosen.len() < wanted {
                let group = GroupId::new(self.rng.random_range(1..=self.config.groups as u64));
                chosen.insert(group);
            }
            for group in chosen {
                builder
                    .add_enrolment(Enrolment::new(id, group))
                    .expect("generator references courses and groups added above");
            }
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_catalog() {
        let a = InstanceGenerator::new(InstanceConfig::default().with_seed(42)).generate();
        let b = InstanceGenerator::new(InstanceConfig::default().with_seed(42)).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_catalog() {
        let a = InstanceGenerator::new(InstanceConfig::default().with_seed(1)).generate();
        let b = InstanceGenerator::new(InstanceConfig::default().with_seed(2)).generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_catalog_is_consistent() {
        let catalog = InstanceGenerator::new(InstanceConfig::default().with_seed(7)).generate();
        assert_eq!(catalog.iter_courses().count(), 10);
        assert_eq!(catalog.iter_slots().count(), 20);
        for course in catalog.iter_courses() {
            assert!(catalog.teacher(course.teacher()).is_some());
        }
        for enrolment in catalog.enrolments() {
            assert!(catalog.course(enrolment.course()).is_some());
            assert!(catalog.group(enrolment.group()).is_some());
        }
        for room in catalog.iter_rooms() {
            assert!(room.capacity().value() > 0);
        }
    }

    #[test]
    fn test_every_room_kind_is_covered() {
        let catalog = InstanceGenerator::new(InstanceConfig::default().with_seed(3)).generate();
        for &kind in ROOM_KINDS.iter() {
            assert!(catalog.iter_rooms().any(|r| r.kind() == kind));
        }
    }
}
