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

use chrono::NaiveDate;
use class_alloc_engine::store::MemoryStore;
use class_alloc_engine::{Engine, RunControl};
use class_alloc_model::generator::{InstanceConfig, InstanceGenerator};
use class_alloc_model::request::{GenerationRequest, ScopeSet};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> ExitCode {
    enable_tracing();

    let seed = 42u64;
    let catalog = InstanceGenerator::new(
        InstanceConfig::default()
            .with_seed(seed)
            .with_courses(12)
            .with_groups(10),
    )
    .generate();
    info!(
        seed,
        courses = catalog.iter_courses().count(),
        groups = catalog.iter_groups().count(),
        rooms = catalog.iter_rooms().count(),
        slots = catalog.iter_slots().count(),
        "generated campus instance"
    );

    // Two teaching weeks starting on a Monday.
    let request = GenerationRequest::new(
        NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date"),
        NaiveDate::from_ymd_opt(2025, 9, 12).expect("valid date"),
        ScopeSet::All,
        ScopeSet::All,
        false,
    );

    let engine = Engine::new(catalog);
    let mut store = MemoryStore::new();
    let mut conflicts = MemoryStore::new();
    let started = Instant::now();
    let report = match engine.generate(&mut store, &mut conflicts, &request, &RunControl::new()) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("generation failed: {error}");
            return ExitCode::FAILURE;
        }
    };
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "run done");

    match serde_json::to_string_pretty(&report) {
        Ok(payload) => println!("{payload}"),
        Err(error) => {
            eprintln!("cannot render report: {error}");
            return ExitCode::FAILURE;
        }
    }
    info!(
        planned = report.statistics().planned(),
        failed = report.statistics().failed(),
        conflicts = report.statistics().conflicts(),
        stored = store.iter_assignments().count(),
        "generation finished"
    );

    ExitCode::SUCCESS
}
