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

//! # Core Primitives (`class-alloc-core`)
//!
//! Foundational, type-safe building blocks for the class allocation
//! engine. This crate knows nothing about courses, rooms or teachers;
//! it only models the two raw dimensions every placement decision is
//! made in:
//!
//! - **Time**: [`units::Minutes`] for durations, [`time::TimeWindow`]
//!   for half-open `[start, end)` windows within a day, and
//!   [`calendar::DateRange`] for inclusive spans of calendar days.
//! - **Load**: [`units::Headcount`] for group sizes and
//!   [`units::Capacity`] for room sizes, kept as distinct newtypes so
//!   the two can never be confused or compared by accident.

pub mod calendar;
pub mod time;
pub mod units;
