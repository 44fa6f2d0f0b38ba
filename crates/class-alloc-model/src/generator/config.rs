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

use chrono::NaiveTime;
use class_alloc_core::units::Minutes;

/// Configuration for synthetic catalog generation (campus-like units).
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceConfig {
    pub(crate) seed: u64,
    pub(crate) teachers: usize,
    pub(crate) groups: usize,
    pub(crate) courses: usize,
    pub(crate) rooms: usize,
    pub(crate) slots_per_day: usize,
    pub(crate) day_start: NaiveTime,
    pub(crate) slot_length: Minutes,
    pub(crate) min_headcount: u32,
    pub(crate) max_headcount: u32,
    pub(crate) min_capacity: u32,
    pub(crate) max_capacity: u32,
    pub(crate) min_required_hours: u32,
    pub(crate) max_required_hours: u32,
    pub(crate) session_hours: u32,
    pub(crate) availability_density: f64,
    pub(crate) max_groups_per_course: usize,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            teachers: 6,
            groups: 8,
            courses: 10,
            rooms: 8,
            slots_per_day: 4,
            day_start: NaiveTime::from_hms_opt(8, 0, 0).expect("valid day start"),
            slot_length: Minutes::from_hours(2),
            min_headcount: 15,
            max_headcount: 35,
            min_capacity: 20,
            max_capacity: 60,
            min_required_hours: 2,
            max_required_hours: 8,
            session_hours: 2,
            availability_density: 0.8,
            max_groups_per_course: 2,
        }
    }
}

impl InstanceConfig {
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn with_teachers(mut self, teachers: usize) -> Self {
        self.teachers = teachers;
        self
    }

    #[inline]
    pub fn with_groups(mut self, groups: usize) -> Self {
        self.groups = groups;
        self
    }

    #[inline]
    pub fn with_courses(mut self, courses: usize) -> Self {
        self.courses = courses;
        self
    }

    #[inline]
    pub fn with_rooms(mut self, rooms: usize) -> Self {
        self.rooms = rooms;
        self
    }

    #[inline]
    pub fn with_slots_per_day(mut self, slots_per_day: usize) -> Self {
        self.slots_per_day = slots_per_day;
        self
    }

    #[inline]
    pub fn with_availability_density(mut self, density: f64) -> Self {
        self.availability_density = density.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn with_required_hours(mut self, min: u32, max: u32) -> Self {
        self.min_required_hours = min;
        self.max_required_hours = max.max(min);
        self
    }
}
