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

use std::fmt::Display;

/// How a teacher with no availability record at all resolves.
///
/// The catalog may simply not know a teacher's schedule; whether that
/// silence means "free" or "never book" is an institutional choice, so
/// it is an explicit configuration value rather than an implicit
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AvailabilityFallback {
    /// Teachers without records accept any slot.
    AssumeAvailable,
    /// Teachers without records accept no slot.
    #[default]
    AssumeUnavailable,
}

impl Display for AvailabilityFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityFallback::AssumeAvailable => write!(f, "assume-available"),
            AvailabilityFallback::AssumeUnavailable => write!(f, "assume-unavailable"),
        }
    }
}

/// Engine-wide configuration knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    availability_fallback: AvailabilityFallback,
}

impl EngineConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_availability_fallback(mut self, fallback: AvailabilityFallback) -> Self {
        self.availability_fallback = fallback;
        self
    }

    #[inline]
    pub fn availability_fallback(&self) -> AvailabilityFallback {
        self.availability_fallback
    }
}
