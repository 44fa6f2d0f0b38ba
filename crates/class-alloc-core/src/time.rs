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

use crate::units::Minutes;
use chrono::NaiveTime;
use std::fmt::Display;

/// Error raised when a window's start does not strictly precede its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyTimeWindowError {
    start: NaiveTime,
    end: NaiveTime,
}

impl EmptyTimeWindowError {
    #[inline]
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl Display for EmptyTimeWindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Time window start {} does not precede end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for EmptyTimeWindowError {}

/// A half-open `[start, end)` window within a single day.
///
/// Ordering is lexicographic on `(start, end)`, which gives the
/// canonical earliest-first ordering used when slots are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeWindow {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, EmptyTimeWindowError> {
        if start >= end {
            return Err(EmptyTimeWindowError::new(start, end));
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        let minutes = self.end.signed_duration_since(self.start).num_minutes();
        Minutes::new(minutes as u32)
    }

    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether `other` lies entirely within this window.
    #[inline]
    pub fn contains_window(&self, other: &TimeWindow) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[inline]
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn w(h0: u32, m0: u32, h1: u32, m1: u32) -> TimeWindow {
        TimeWindow::new(t(h0, m0), t(h1, m1)).expect("valid window")
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(matches!(
            TimeWindow::new(t(10, 0), t(10, 0)),
            Err(EmptyTimeWindowError { .. })
        ));
        assert!(TimeWindow::new(t(10, 0), t(9, 0)).is_err());
    }

    #[test]
    fn test_duration() {
        assert_eq!(w(8, 0, 10, 0).duration(), Minutes::new(120));
        assert_eq!(w(8, 15, 9, 0).duration(), Minutes::new(45));
    }

    #[test]
    fn test_contains_is_half_open() {
        let window = w(8, 0, 10, 0);
        assert!(window.contains(t(8, 0)));
        assert!(window.contains(t(9, 59)));
        assert!(!window.contains(t(10, 0)));
    }

    #[test]
    fn test_contains_window() {
        let outer = w(8, 0, 12, 0);
        assert!(outer.contains_window(&w(8, 0, 12, 0)));
        assert!(outer.contains_window(&w(9, 0, 10, 0)));
        assert!(!outer.contains_window(&w(11, 0, 13, 0)));
    }

    #[test]
    fn test_overlaps() {
        assert!(w(8, 0, 10, 0).overlaps(&w(9, 0, 11, 0)));
        assert!(!w(8, 0, 10, 0).overlaps(&w(10, 0, 12, 0)));
    }

    #[test]
    fn test_ordering_is_earliest_first() {
        let mut windows = vec![w(10, 0, 12, 0), w(8, 0, 10, 0), w(8, 0, 9, 0)];
        windows.sort();
        assert_eq!(windows, vec![w(8, 0, 9, 0), w(8, 0, 10, 0), w(10, 0, 12, 0)]);
    }
}
