//! Bar interval (sampling frequency) of a price series.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Sampling interval of a series, using the market-data provider's codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interval {
    /// One minute.
    #[serde(rename = "1m")]
    Minute1,
    /// Five minutes.
    #[serde(rename = "5m")]
    Minute5,
    /// Fifteen minutes.
    #[serde(rename = "15m")]
    Minute15,
    /// Thirty minutes.
    #[serde(rename = "30m")]
    Minute30,
    /// Sixty minutes.
    #[serde(rename = "60m")]
    Minute60,
    /// Ninety minutes.
    #[serde(rename = "90m")]
    Minute90,
    /// One trading day.
    #[default]
    #[serde(rename = "1d")]
    Day1,
    /// One week.
    #[serde(rename = "1wk")]
    Week1,
    /// One month.
    #[serde(rename = "1mo")]
    Month1,
    /// Three months.
    #[serde(rename = "3mo")]
    Month3,
}

impl Interval {
    /// All supported intervals, shortest first.
    pub const ALL: [Interval; 10] = [
        Interval::Minute1,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Minute60,
        Interval::Minute90,
        Interval::Day1,
        Interval::Week1,
        Interval::Month1,
        Interval::Month3,
    ];

    /// Returns the provider code, e.g. `"1d"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Minute60 => "60m",
            Interval::Minute90 => "90m",
            Interval::Day1 => "1d",
            Interval::Week1 => "1wk",
            Interval::Month1 => "1mo",
            Interval::Month3 => "3mo",
        }
    }

    /// Returns true for sub-daily intervals, whose timestamps carry a time of day.
    #[must_use]
    pub fn is_intraday(&self) -> bool {
        matches!(
            self,
            Interval::Minute1
                | Interval::Minute5
                | Interval::Minute15
                | Interval::Minute30
                | Interval::Minute60
                | Interval::Minute90
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.code() == s)
            .ok_or_else(|| CoreError::Parse(format!("unknown interval '{s}'")))
    }
}
