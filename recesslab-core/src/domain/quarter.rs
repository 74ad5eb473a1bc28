//! Quarter labels — `<year>q<1-4>` tokens, totally ordered by (year, quarter).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A calendar quarter, e.g. `2008q3`.
///
/// Ordering follows calendar time: year first, then quarter number.
/// Serializes as the token string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuarterLabel {
    year: i32,
    quarter: u8,
}

impl QuarterLabel {
    /// Build a label. Panics if `quarter` is outside 1..=4 (programmer error;
    /// parse untrusted tokens with `FromStr` instead).
    pub fn new(year: i32, quarter: u8) -> Self {
        assert!((1..=4).contains(&quarter), "quarter must be 1..=4");
        Self { year, quarter }
    }

    /// The quarter containing a calendar month (1..=12).
    pub fn from_month(year: i32, month: u32) -> Self {
        assert!((1..=12).contains(&month), "month must be 1..=12");
        Self::new(year, ((month - 1) / 3 + 1) as u8)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Calendar successor: q4 rolls over to the next year's q1.
    pub fn succ(&self) -> Self {
        if self.quarter == 4 {
            Self { year: self.year + 1, quarter: 1 }
        } else {
            Self { year: self.year, quarter: self.quarter + 1 }
        }
    }
}

impl fmt::Display for QuarterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}q{}", self.year, self.quarter)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed quarter label: {token:?} (expected <year>q<1-4>)")]
pub struct ParseQuarterError {
    pub token: String,
}

impl FromStr for QuarterLabel {
    type Err = ParseQuarterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseQuarterError { token: s.to_string() };
        let (year, quarter) = s.split_once('q').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let quarter: u8 = quarter.parse().map_err(|_| err())?;
        if !(1..=4).contains(&quarter) {
            return Err(err());
        }
        Ok(Self { year, quarter })
    }
}

impl Serialize for QuarterLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuarterLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
