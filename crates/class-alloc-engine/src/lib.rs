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

//! # Class Allocation Engine (`class-alloc-engine`)
//!
//! The automatic generation and conflict-resolution engine: expands
//! required teaching hours into placeable sessions, searches the
//! candidate space of (date, slot, room) under hard constraints,
//! commits feasible placements and reports the rest.
//!
//! A run only halts on a malformed request or a storage failure;
//! sessions that cannot be placed and pre-existing inconsistencies are
//! expected outcomes folded into the result payload.
//!
//! ```
//! use class_alloc_engine::{Engine, RunControl, store::MemoryStore};
//! use class_alloc_model::generator::{InstanceConfig, InstanceGenerator};
//! use class_alloc_model::request::{GenerationRequest, ScopeSet};
//! use chrono::NaiveDate;
//!
//! let catalog = InstanceGenerator::new(InstanceConfig::default()).generate();
//! let engine = Engine::new(catalog);
//! let mut store = MemoryStore::new();
//! let mut conflicts = MemoryStore::new();
//! let request = GenerationRequest::new(
//!     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
//!     ScopeSet::All,
//!     ScopeSet::All,
//!     false,
//! );
//! let report = engine
//!     .generate(&mut store, &mut conflicts, &request, &RunControl::new())
//!     .expect("well-formed request");
//! assert_eq!(
//!     report.statistics().planned(),
//!     store.iter_assignments().count()
//! );
//! ```

pub mod availability;
pub mod collector;
pub mod config;
pub mod feasibility;
pub mod ledger;
pub mod overwrite;
pub mod planner;
pub mod report;
pub mod store;

pub use config::{AvailabilityFallback, EngineConfig};
pub use planner::{Planner, RunControl, RunOutcome};

use class_alloc_model::catalog::Catalog;
use class_alloc_model::err::ValidationError;
use class_alloc_model::report::GenerationReport;
use class_alloc_model::request::GenerationRequest;
use std::fmt::Display;
use store::{AssignmentStore, ConflictStore, StoreError};

/// The only errors that halt a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The request was malformed; nothing was done.
    Validation(ValidationError),
    /// Storage failed mid-run; the run's transaction was not applied.
    Persistence(StoreError),
}

impl From<ValidationError> for EngineError {
    fn from(value: ValidationError) -> Self {
        EngineError::Validation(value)
    }
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        EngineError::Persistence(value)
    }
}

impl Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Validation(e) => write!(f, "Validation error: {e}"),
            EngineError::Persistence(e) => write!(f, "Persistence error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// Facade owning the catalog and configuration of a planning context.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
    config: EngineConfig,
}

impl Engine {
    #[inline]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: EngineConfig::default(),
        }
    }

    #[inline]
    pub fn with_config(catalog: Catalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one generation and returns the planner's raw outcome.
    pub fn plan<S, C>(
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
        Planner::new(&self.catalog, &self.config).run(store, conflicts, request, control)
    }

    /// Runs one generation and renders the caller-facing report.
    pub fn generate<S, C>(
        &self,
        store: &mut S,
        conflicts: &mut C,
        request: &GenerationRequest,
        control: &RunControl,
    ) -> Result<GenerationReport, EngineError>
    where
        S: AssignmentStore,
        C: ConflictStore,
    {
        let outcome = self.plan(store, conflicts, request, control)?;
        Ok(report::build_report(&outcome))
    }
}
