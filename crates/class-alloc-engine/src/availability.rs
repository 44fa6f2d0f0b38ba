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

//! Resolves whether a teacher is free at a given date and time window.
//!
//! Resolution order: date-bounded overrides win over weekly defaults;
//! among overrides covering the same date, the one added last wins.
//! Teachers with no availability record at all resolve to the
//! configured [`AvailabilityFallback`].

use crate::config::AvailabilityFallback;
use chrono::{Datelike, NaiveDate, Weekday};
use class_alloc_core::time::TimeWindow;
use class_alloc_model::catalog::{AvailabilityOverride, Catalog};
use class_alloc_model::id::TeacherId;
use std::collections::{HashMap, HashSet};

/// Per-run index over a catalog's availability records.
#[derive(Debug, Clone)]
pub struct AvailabilityIndex {
    weekly: HashMap<(TeacherId, Weekday), Vec<TimeWindow>>,
    overrides: HashMap<TeacherId, Vec<AvailabilityOverride>>,
    known: HashSet<TeacherId>,
    fallback: AvailabilityFallback,
}

impl AvailabilityIndex {
    pub fn build(catalog: &Catalog, fallback: AvailabilityFallback) -> Self {
        let mut weekly: HashMap<(TeacherId, Weekday), Vec<TimeWindow>> = HashMap::new();
        let mut overrides: HashMap<TeacherId, Vec<AvailabilityOverride>> = HashMap::new();
        let mut known = HashSet::new();

        for record in catalog.weekly_availability() {
            known.insert(record.teacher());
            weekly
                .entry((record.teacher(), record.weekday()))
                .or_default()
                .push(record.window());
        }
        for windows in weekly.values_mut() {
            windows.sort();
        }
        for exception in catalog.availability_overrides() {
            known.insert(exception.teacher());
            overrides
                .entry(exception.teacher())
                .or_default()
                .push(*exception);
        }

        Self {
            weekly,
            overrides,
            known,
            fallback,
        }
    }

    /// Whether `teacher` can teach for the whole of `window` on `date`.
    pub fn is_available(&self, teacher: TeacherId, date: NaiveDate, window: &TimeWindow) -> bool {
        if let Some(verdict) = self.override_verdict(teacher, date, window) {
            return verdict;
        }
        if !self.known.contains(&teacher) {
            return self.fallback == AvailabilityFallback::AssumeAvailable;
        }
        self.weekly
            .get(&(teacher, date.weekday()))
            .is_some_and(|windows| windows.iter().any(|w| w.contains_window(window)))
    }

    /// The verdict of the last override covering `(date, window)`, if
    /// any. A re-opening override must contain the whole window; a
    /// blackout applies on any overlap.
    fn override_verdict(
        &self,
        teacher: TeacherId,
        date: NaiveDate,
        window: &TimeWindow,
    ) -> Option<bool> {
        let overrides = self.overrides.get(&teacher)?;
        let mut verdict = None;
        for exception in overrides {
            if !exception.period().contains(date) {
                continue;
            }
            let applies = match exception.window() {
                None => true,
                Some(w) if exception.available() => w.contains_window(window),
                Some(w) => w.overlaps(window),
            };
            if applies {
                verdict = Some(exception.available());
            }
        }
        verdict
    }
}
