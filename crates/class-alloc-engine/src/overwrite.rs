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

//! Staging of overwrite deletions.
//!
//! Deletions are not executed here: the staged ids are excluded from
//! ledger seeding (so the planner treats their slots as free) and
//! folded into the run's single [`crate::store::RunCommit`], which the
//! store applies atomically. A partially cleared store is therefore
//! unrepresentable.

use class_alloc_model::id::AssignmentId;
use class_alloc_model::record::Assignment;
use class_alloc_model::request::ValidScope;
use std::collections::BTreeSet;

/// The ids to delete before planning: exactly the in-scope, in-range
/// assignments, and only when the request asked to overwrite.
pub fn stage_overwrite(existing: &[Assignment], scope: &ValidScope) -> BTreeSet<AssignmentId> {
    if !scope.overwrite() {
        return BTreeSet::new();
    }
    existing
        .iter()
        .filter(|a| scope.covers(a.course(), a.group(), a.date()))
        .map(|a| a.id())
        .collect()
}
