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
use std::fmt::Display;

/// Error raised when a range's first day lies after its last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyDateRangeError {
    first: NaiveDate,
    last: NaiveDate,
}

impl EmptyDateRangeError {
    #[inline]
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        Self { first, last }
    }

    #[inline]
    pub fn first(&self) -> NaiveDate {
        self.first
    }

    #[inline]
    pub fn last(&self) -> NaiveDate {
        self.last
    }
}

impl Display for EmptyDateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Date range first day {} lies after last day {}",
            self.first, self.last
        )
    }
}

impl std::error::Error for EmptyDateRangeError {}

/// An inclusive `[first, last]` span of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateRange {
    first: NaiveDate,
    last: NaiveDate,
}

impl DateRange {
    pub fn new(first: NaiveDate, last: NaiveDate) -> Result<Self, EmptyDateRangeError> {
        if first > last {
            return Err(EmptyDateRangeError::new(first, last));
        }
        Ok(Self { first, last })
    }

    #[inline]
    pub fn first(&self) -> NaiveDate {
        self.first
    }

    #[inline]
    pub fn last(&self) -> NaiveDate {
        self.last
    }

    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    #[inline]
    pub fn len_days(&self) -> u64 {
        (self.last - self.first).num_days() as u64 + 1
    }

    /// Days of the range in ascending order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            DateRange::new(d(2025, 9, 2), d(2025, 9, 1)),
            Err(EmptyDateRangeError { .. })
        ));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(d(2025, 9, 1), d(2025, 9, 1)).expect("valid range");
        assert_eq!(range.len_days(), 1);
        assert!(range.contains(d(2025, 9, 1)));
        assert!(!range.contains(d(2025, 9, 2)));
    }

    #[test]
    fn test_iter_days_ascending() {
        let range = DateRange::new(d(2025, 9, 1), d(2025, 9, 5)).expect("valid range");
        let days: Vec<_> = range.iter_days().collect();
        assert_eq!(days.len(), 5);
        assert_eq!(days.first(), Some(&d(2025, 9, 1)));
        assert_eq!(days.last(), Some(&d(2025, 9, 5)));
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_iter_days_crosses_month_boundary() {
        let range = DateRange::new(d(2025, 8, 30), d(2025, 9, 2)).expect("valid range");
        let days: Vec<_> = range.iter_days().collect();
        assert_eq!(days, vec![
            d(2025, 8, 30),
            d(2025, 8, 31),
            d(2025, 9, 1),
            d(2025, 9, 2),
        ]);
    }
}
