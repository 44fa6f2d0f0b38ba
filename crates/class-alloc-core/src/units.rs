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
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A non-negative duration measured in whole minutes.
///
/// All teaching loads and window lengths in the workspace are expressed
/// in minutes; hours only appear at the API boundary via
/// [`Minutes::from_hours`].
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Minutes(u32);

impl Minutes {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Minutes(value)
    }

    #[inline]
    pub const fn from_hours(hours: u32) -> Self {
        Minutes(hours * 60)
    }

    #[inline]
    pub const fn zero() -> Self {
        Minutes(0)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn saturating_sub(self, rhs: Minutes) -> Minutes {
        Minutes(self.0.saturating_sub(rhs.0))
    }

    /// Number of `chunk`-sized pieces needed to cover this duration,
    /// rounding up.
    ///
    /// # Panics
    /// Panics when `chunk` is zero.
    #[inline]
    pub fn div_ceil(self, chunk: Minutes) -> u32 {
        assert!(!chunk.is_zero(), "chunk must be non-zero");
        self.0.div_ceil(chunk.0)
    }
}

impl Add for Minutes {
    type Output = Minutes;

    #[inline]
    fn add(self, rhs: Minutes) -> Minutes {
        Minutes(self.0 + rhs.0)
    }
}

impl AddAssign for Minutes {
    #[inline]
    fn add_assign(&mut self, rhs: Minutes) {
        self.0 += rhs.0;
    }
}

impl Sum for Minutes {
    fn sum<I: Iterator<Item = Minutes>>(iter: I) -> Minutes {
        iter.fold(Minutes::zero(), Add::add)
    }
}

impl Display for Minutes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}min", self.0)
    }
}

impl From<u32> for Minutes {
    #[inline]
    fn from(value: u32) -> Self {
        Minutes(value)
    }
}

/// The number of students in a group.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Headcount(u32);

impl Headcount {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Headcount(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl Display for Headcount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Headcount({})", self.0)
    }
}

impl From<u32> for Headcount {
    #[inline]
    fn from(value: u32) -> Self {
        Headcount(value)
    }
}

/// The number of seats a room offers.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Capacity(u32);

impl Capacity {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Capacity(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Whether a group of the given size fits into this room.
    #[inline]
    pub const fn accommodates(self, headcount: Headcount) -> bool {
        self.0 >= headcount.value()
    }

    /// Seats left over once the group is seated, or `None` when the
    /// room is too small.
    ///
    /// Rooms are ranked by ascending surplus so that the smallest
    /// sufficient room is tried first.
    #[inline]
    pub const fn surplus_over(self, headcount: Headcount) -> Option<u32> {
        if self.accommodates(headcount) {
            Some(self.0 - headcount.value())
        } else {
            None
        }
    }
}

impl Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Capacity({})", self.0)
    }
}

impl From<u32> for Capacity {
    #[inline]
    fn from(value: u32) -> Self {
        Capacity(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_from_hours() {
        assert_eq!(Minutes::from_hours(2), Minutes::new(120));
        assert_eq!(Minutes::from_hours(0), Minutes::zero());
    }

    #[test]
    fn test_minutes_div_ceil_rounds_up() {
        assert_eq!(Minutes::new(180).div_ceil(Minutes::new(120)), 2);
        assert_eq!(Minutes::new(240).div_ceil(Minutes::new(120)), 2);
        assert_eq!(Minutes::new(0).div_ceil(Minutes::new(60)), 0);
    }

    #[test]
    #[should_panic(expected = "chunk must be non-zero")]
    fn test_minutes_div_ceil_zero_chunk_panics() {
        let _ = Minutes::new(60).div_ceil(Minutes::zero());
    }

    #[test]
    fn test_minutes_saturating_sub() {
        assert_eq!(
            Minutes::new(30).saturating_sub(Minutes::new(45)),
            Minutes::zero()
        );
        assert_eq!(
            Minutes::new(45).saturating_sub(Minutes::new(30)),
            Minutes::new(15)
        );
    }

    #[test]
    fn test_minutes_sum() {
        let total: Minutes = [Minutes::new(30), Minutes::new(45)].into_iter().sum();
        assert_eq!(total, Minutes::new(75));
    }

    #[test]
    fn test_capacity_accommodates() {
        assert!(Capacity::new(30).accommodates(Headcount::new(30)));
        assert!(!Capacity::new(20).accommodates(Headcount::new(30)));
    }

    #[test]
    fn test_capacity_surplus() {
        assert_eq!(Capacity::new(35).surplus_over(Headcount::new(30)), Some(5));
        assert_eq!(Capacity::new(20).surplus_over(Headcount::new(30)), None);
    }
}
