//! Descriptive statistics over per-bar percentage returns.
//!
//! The summary counts up and down bars, measures the longest streak in each
//! direction, and reports mean/max/min over all returns and over the
//! up-only and down-only subsets. A subset that is legitimately empty (no
//! down bars in a rising series) yields NaN statistics rather than an error.

use serde::{Deserialize, Serialize};
use tickstats_core::PriceSeries;
use tickstats_math::stats::{max, mean, min, round_to};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Direction of a run of consecutive returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakDirection {
    /// Strictly positive returns.
    Up,
    /// Strictly negative returns.
    Down,
}

impl StreakDirection {
    /// Returns true if `value` continues a streak in this direction.
    pub fn qualifies(self, value: f64) -> bool {
        match self {
            Self::Up => value > 0.0,
            Self::Down => value < 0.0,
        }
    }
}

/// Mean, maximum and minimum of a set of values.
///
/// All three are NaN when the set is empty; JSON carries that as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Arithmetic mean.
    #[serde(with = "crate::serde_nan")]
    pub average: f64,
    /// Largest value.
    #[serde(with = "crate::serde_nan")]
    pub max: f64,
    /// Smallest value.
    #[serde(with = "crate::serde_nan")]
    pub min: f64,
}

impl DescriptiveStats {
    /// Computes the statistics of `values`.
    pub fn of(values: &[f64]) -> Self {
        Self {
            average: mean(values),
            max: max(values),
            min: min(values),
        }
    }

    /// Returns true when computed from an empty set.
    pub fn is_undefined(&self) -> bool {
        self.average.is_nan()
    }

    /// Rounds every field to `decimals` places.
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            average: round_to(self.average, decimals),
            max: round_to(self.max, decimals),
            min: round_to(self.min, decimals),
        }
    }
}

/// Summary of the percentage returns of a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsSummary {
    /// Number of returns (bars minus one).
    pub number_of_candles: usize,
    /// Returns strictly above zero.
    pub number_of_up_candles: usize,
    /// Returns strictly below zero.
    pub number_of_down_candles: usize,
    /// Longest run of consecutive up returns.
    pub longest_up_streak: usize,
    /// Longest run of consecutive down returns.
    pub longest_down_streak: usize,
    /// Statistics over every return.
    pub all: DescriptiveStats,
    /// Statistics over up returns only.
    pub up: DescriptiveStats,
    /// Statistics over down returns only.
    pub down: DescriptiveStats,
}

impl ReturnsSummary {
    /// Summarizes a sequence of percentage returns.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InsufficientData` if `returns` is empty.
    pub fn from_returns(returns: &[f64]) -> AnalyticsResult<Self> {
        if returns.is_empty() {
            return Err(AnalyticsError::insufficient_data(
                "returns statistics need at least one return",
            ));
        }

        let up: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
        let down: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();

        Ok(Self {
            number_of_candles: returns.len(),
            number_of_up_candles: up.len(),
            number_of_down_candles: down.len(),
            longest_up_streak: longest_streak(returns, StreakDirection::Up),
            longest_down_streak: longest_streak(returns, StreakDirection::Down),
            all: DescriptiveStats::of(returns),
            up: DescriptiveStats::of(&up),
            down: DescriptiveStats::of(&down),
        })
    }

    /// Returns a copy with every statistic rounded for display.
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        Self {
            all: self.all.rounded(decimals),
            up: self.up.rounded(decimals),
            down: self.down.rounded(decimals),
            ..self.clone()
        }
    }
}

/// Computes the returns summary of a price series.
///
/// # Errors
///
/// Returns `AnalyticsError::InsufficientData` for fewer than two bars.
pub fn percentage_returns_statistics(series: &PriceSeries) -> AnalyticsResult<ReturnsSummary> {
    series.require_len(2)?;
    ReturnsSummary::from_returns(&series.percentage_returns())
}

/// Length of the longest run of consecutive returns in `direction`.
///
/// A zero return breaks both kinds of streak.
pub fn longest_streak(returns: &[f64], direction: StreakDirection) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &value in returns {
        if direction.qualifies(value) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
