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

//! The run result returned to the caller.
//!
//! Wire field names follow the collaborator contract:
//! `statistiques.totalSeancesPlanifiees`, `affectationsEchouees`, etc.
//! The report is a pure aggregate; it is never persisted as an entity.

use crate::id::{CourseId, GroupId, TimeSlotId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

/// Counters summarising one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunStatistics {
    #[serde(rename = "totalSeancesPlanifiees")]
    planned: usize,
    #[serde(rename = "totalSeancesEchouees")]
    failed: usize,
    #[serde(rename = "conflitsDetectes")]
    conflicts: usize,
}

impl RunStatistics {
    #[inline]
    pub fn new(planned: usize, failed: usize, conflicts: usize) -> Self {
        Self {
            planned,
            failed,
            conflicts,
        }
    }

    #[inline]
    pub fn planned(&self) -> usize {
        self.planned
    }

    #[inline]
    pub fn failed(&self) -> usize {
        self.failed
    }

    #[inline]
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }
}

impl Display for RunStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} planned, {} failed, {} conflicts",
            self.planned, self.failed, self.conflicts
        )
    }
}

/// One session the planner could not place.
///
/// `date` and `slot` carry the last candidate examined before the
/// search space was exhausted, or `None` when no candidate existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedSession {
    #[serde(rename = "cours")]
    course: CourseId,
    #[serde(rename = "groupe")]
    group: GroupId,
    #[serde(rename = "date")]
    date: Option<NaiveDate>,
    #[serde(rename = "creneau")]
    slot: Option<TimeSlotId>,
    #[serde(rename = "raison")]
    reason: String,
}

impl FailedSession {
    #[inline]
    pub fn new(
        course: CourseId,
        group: GroupId,
        date: Option<NaiveDate>,
        slot: Option<TimeSlotId>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            course,
            group,
            date,
            slot,
            reason: reason.into(),
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
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for FailedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FailedSession({}, {}: {})",
            self.course, self.group, self.reason
        )
    }
}

/// The structured result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    #[serde(rename = "statistiques")]
    statistics: RunStatistics,
    #[serde(rename = "affectationsEchouees")]
    failures: Vec<FailedSession>,
}

impl GenerationReport {
    #[inline]
    pub fn new(statistics: RunStatistics, failures: Vec<FailedSession>) -> Self {
        Self {
            statistics,
            failures,
        }
    }

    #[inline]
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    #[inline]
    pub fn failures(&self) -> &[FailedSession] {
        &self.failures
    }
}

impl Display for GenerationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Generation report: {}", self.statistics)?;
        for failure in &self.failures {
            writeln!(f, "  {failure}")?;
        }
        Ok(())
    }
}
