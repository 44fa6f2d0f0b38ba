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

//! Storage seams of the engine.
//!
//! The engine reads the assignment store once per run and writes back
//! exactly once, through a [`RunCommit`] that carries the run's
//! deletions and insertions together. A store implementation must
//! apply a commit atomically: either every deletion and insertion
//! lands, or none does.

use chrono::NaiveDateTime;
use class_alloc_core::calendar::DateRange;
use class_alloc_model::id::{AssignmentId, ConflictId};
use class_alloc_model::record::{Assignment, Conflict, ConflictKind};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A storage failure. Always fatal for the run that sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    reason: String,
}

impl StoreError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store error: {}", self.reason)
    }
}

impl std::error::Error for StoreError {}

/// A constraint violation found outside the normal placement flow,
/// not yet stamped with an id or detection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedConflict {
    kind: ConflictKind,
    description: String,
}

impl DetectedConflict {
    #[inline]
    pub fn new(kind: ConflictKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Display for DetectedConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

/// Every persistence write of one run: overwrite deletions plus the
/// assignments committed by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunCommit {
    deleted: Vec<AssignmentId>,
    inserted: Vec<Assignment>,
}

impl RunCommit {
    #[inline]
    pub fn new(deleted: Vec<AssignmentId>, inserted: Vec<Assignment>) -> Self {
        Self { deleted, inserted }
    }

    #[inline]
    pub fn deleted(&self) -> &[AssignmentId] {
        &self.deleted
    }

    #[inline]
    pub fn inserted(&self) -> &[Assignment] {
        &self.inserted
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.inserted.is_empty()
    }
}

/// Read+write access to the persisted assignment records.
pub trait AssignmentStore {
    /// All assignments whose date falls within `period`.
    fn load_range(&self, period: &DateRange) -> Result<Vec<Assignment>, StoreError>;

    /// Applies the run's deletions and insertions as one transaction.
    fn apply(&mut self, commit: RunCommit) -> Result<(), StoreError>;
}

/// Write-only access to the conflict records reviewed by the external
/// resolution workflow.
pub trait ConflictStore {
    fn record(
        &mut self,
        conflict: DetectedConflict,
        detected_at: NaiveDateTime,
    ) -> Result<ConflictId, StoreError>;
}

/// In-memory store used by the demo harness and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    assignments: BTreeMap<AssignmentId, Assignment>,
    conflicts: BTreeMap<ConflictId, Conflict>,
    next_conflict_id: u64,
    fail_next_apply: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pre-existing assignment, e.g. one left over from an
    /// earlier run. Fails on a duplicate id.
    pub fn insert(&mut self, assignment: Assignment) -> Result<AssignmentId, StoreError> {
        let id = assignment.id();
        if self.assignments.contains_key(&id) {
            return Err(StoreError::new(format!("duplicate assignment id {id}")));
        }
        self.assignments.insert(id, assignment);
        Ok(id)
    }

    /// Makes the next [`AssignmentStore::apply`] fail, for tests that
    /// exercise mid-run storage failures.
    pub fn fail_next_apply(&mut self) {
        self.fail_next_apply = true;
    }

    pub fn iter_assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.values()
    }

    pub fn iter_conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.values()
    }
}

impl AssignmentStore for MemoryStore {
    fn load_range(&self, period: &DateRange) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .values()
            .filter(|a| period.contains(a.date()))
            .cloned()
            .collect())
    }

    fn apply(&mut self, commit: RunCommit) -> Result<(), StoreError> {
        if self.fail_next_apply {
            self.fail_next_apply = false;
            return Err(StoreError::new("injected apply failure"));
        }
        // Validate the whole commit before touching any record, so a
        // rejected commit leaves the store exactly as it was.
        for id in commit.deleted() {
            if !self.assignments.contains_key(id) {
                return Err(StoreError::new(format!("cannot delete unknown {id}")));
            }
        }
        for assignment in commit.inserted() {
            let id = assignment.id();
            if self.assignments.contains_key(&id) && !commit.deleted().contains(&id) {
                return Err(StoreError::new(format!("duplicate assignment id {id}")));
            }
        }
        for id in commit.deleted() {
            self.assignments.remove(id);
        }
        for assignment in commit.inserted() {
            self.assignments.insert(assignment.id(), assignment.clone());
        }
        Ok(())
    }
}

impl ConflictStore for MemoryStore {
    fn record(
        &mut self,
        conflict: DetectedConflict,
        detected_at: NaiveDateTime,
    ) -> Result<ConflictId, StoreError> {
        self.next_conflict_id += 1;
        let id = ConflictId::new(self.next_conflict_id);
        self.conflicts.insert(
            id,
            Conflict::new(id, conflict.kind(), conflict.description(), detected_at),
        );
        Ok(id)
    }
}
