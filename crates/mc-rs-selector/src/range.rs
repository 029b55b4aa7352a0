//! Numeric range arguments: `..5`, `2..`, `2..5`, `5`.

use std::str::FromStr;

use crate::error::RangeError;

/// A parsed range argument. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range<T> {
    /// `..max`
    UpTo(T),
    /// `min..`
    AtLeast(T),
    /// `min..max`
    Between(T, T),
    /// A single value.
    Exact(T),
}

/// Integer range used by `level`, `x`/`y`/`z` and `scores`.
pub type IntRange = Range<i32>;

/// Real-valued range used by `distance`.
pub type DistanceRange = Range<f64>;

impl<T: FromStr> Range<T> {
    /// Parse a range argument.
    ///
    /// `..N` is an upper bound, `N..` a lower bound, `A..B` splits on the first
    /// `..`, anything else is an exact value.
    pub fn parse(text: &str) -> Result<Self, RangeError> {
        let text = text.trim();
        let number = |s: &str| {
            s.trim()
                .parse::<T>()
                .map_err(|_| RangeError(text.to_string()))
        };

        if let Some(max) = text.strip_prefix("..") {
            Ok(Range::UpTo(number(max)?))
        } else if let Some((min, max)) = text.split_once("..") {
            if max.trim().is_empty() {
                Ok(Range::AtLeast(number(min)?))
            } else {
                Ok(Range::Between(number(min)?, number(max)?))
            }
        } else {
            Ok(Range::Exact(number(text)?))
        }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    fn contains_by(&self, value: T, exact: impl Fn(T, T) -> bool) -> bool {
        match *self {
            Range::UpTo(max) => value <= max,
            Range::AtLeast(min) => value >= min,
            Range::Between(min, max) => value >= min && value <= max,
            Range::Exact(expected) => exact(value, expected),
        }
    }
}

impl Range<i32> {
    pub fn contains(&self, value: i32) -> bool {
        self.contains_by(value, |a, b| a == b)
    }
}

impl Range<f64> {
    /// Absolute error allowed when matching an exact distance.
    pub const EXACT_TOLERANCE: f64 = 0.1;

    pub fn contains(&self, value: f64) -> bool {
        self.contains_by(value, |a, b| (a - b).abs() < Self::EXACT_TOLERANCE)
    }
}
