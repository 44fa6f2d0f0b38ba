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

//! Aggregates a run outcome into the caller-facing report.
//!
//! Pure: reads the outcome, produces the payload, touches nothing.

use crate::planner::RunOutcome;
use class_alloc_model::report::{FailedSession, GenerationReport, RunStatistics};

pub fn build_report(outcome: &RunOutcome) -> GenerationReport {
    let statistics = RunStatistics::new(
        outcome.committed().len(),
        outcome.failures().len(),
        outcome.conflicts(),
    );
    let failures = outcome
        .failures()
        .iter()
        .map(|failure| {
            FailedSession::new(
                failure.course(),
                failure.group(),
                failure.date(),
                failure.slot(),
                failure.reason(),
            )
        })
        .collect();
    GenerationReport::new(statistics, failures)
}
