//! Ordered OHLC time series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{Bar, Interval};
use crate::error::{CoreError, CoreResult};

/// An ordered, immutable series of OHLC bars for one symbol.
///
/// Timestamps are strictly increasing and every bar has a finite, positive
/// close. Both properties are checked once at construction, so every
/// derivation below can divide by a previous close without further checks.
///
/// # Example
///
/// ```rust
/// use tickstats_core::{Bar, PriceSeries};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let series = PriceSeries::new(
///     "ACME",
///     vec![Bar::from_close(day(2), 100.0), Bar::from_close(day(3), 110.0)],
/// )
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.last_close(), Some(110.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    symbol: String,
    interval: Interval,
    bars: Vec<Bar>,
}

#[derive(Deserialize)]
struct RawPriceSeries {
    symbol: String,
    #[serde(default)]
    interval: Interval,
    bars: Vec<Bar>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = CoreError;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Ok(PriceSeries::new(raw.symbol, raw.bars)?.with_interval(raw.interval))
    }
}

impl PriceSeries {
    /// Creates a validated series.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidBar` if any bar has a non-finite price or a non-positive close
    /// - `CoreError::DuplicateTimestamp` if two consecutive bars share a timestamp
    /// - `CoreError::UnorderedTimestamps` if timestamps go backwards
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> CoreResult<Self> {
        for bar in &bars {
            bar.validate()?;
        }
        for pair in bars.windows(2) {
            match pair[0].timestamp.cmp(&pair[1].timestamp) {
                Ordering::Less => {}
                Ordering::Equal => {
                    return Err(CoreError::DuplicateTimestamp {
                        timestamp: pair[1].timestamp,
                    })
                }
                Ordering::Greater => {
                    return Err(CoreError::UnorderedTimestamps {
                        previous: pair[0].timestamp,
                        current: pair[1].timestamp,
                    })
                }
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            interval: Interval::default(),
            bars,
        })
    }

    /// Creates a series of flat bars from `(timestamp, close)` pairs.
    pub fn from_closes(
        symbol: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDateTime, f64)>,
    ) -> CoreResult<Self> {
        let bars = closes
            .into_iter()
            .map(|(timestamp, close)| Bar::from_close(timestamp, close))
            .collect();
        Self::new(symbol, bars)
    }

    /// Tags the series with its sampling interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the sampling interval.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the bars in chronological order.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Returns the number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the series has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns the earliest bar.
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    /// Returns the latest bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Returns the earliest close.
    pub fn first_close(&self) -> Option<f64> {
        self.first().map(|bar| bar.close)
    }

    /// Returns the latest close, the seed price for forward simulation.
    pub fn last_close(&self) -> Option<f64> {
        self.last().map(|bar| bar.close)
    }

    /// Returns all closes in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Returns all timestamps in chronological order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|bar| bar.timestamp).collect()
    }

    /// Fails unless the series has at least `required` bars.
    pub fn require_len(&self, required: usize) -> CoreResult<()> {
        if self.len() < required {
            return Err(CoreError::insufficient_data(required, self.len()));
        }
        Ok(())
    }

    /// Percentage return per bar: `(c[i] - c[i-1]) / c[i-1] * 100`.
    ///
    /// Bar 0 has no return, so the result has `len() - 1` entries (empty for
    /// fewer than two bars).
    pub fn percentage_returns(&self) -> Vec<f64> {
        self.simple_returns().into_iter().map(|r| r * 100.0).collect()
    }

    /// Fractional return per bar: `(c[i] - c[i-1]) / c[i-1]`.
    pub fn simple_returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|pair| (pair[1].close - pair[0].close) / pair[0].close)
            .collect()
    }

    /// Log return per bar: `ln(c[i] / c[i-1])`.
    pub fn log_returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|pair| (pair[1].close / pair[0].close).ln())
            .collect()
    }

    /// Restricts both series to the timestamps they have in common.
    ///
    /// Returns `(self_aligned, other_aligned)`; both have identical timestamps.
    pub fn inner_join(&self, other: &PriceSeries) -> (PriceSeries, PriceSeries) {
        let mut left = Vec::with_capacity(self.len().min(other.len()));
        let mut right = Vec::with_capacity(left.capacity());

        let (mut i, mut j) = (0, 0);
        while i < self.bars.len() && j < other.bars.len() {
            let (a, b) = (&self.bars[i], &other.bars[j]);
            match a.timestamp.cmp(&b.timestamp) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    left.push(*a);
                    right.push(*b);
                    i += 1;
                    j += 1;
                }
            }
        }

        (self.derived(left), other.derived(right))
    }

    /// Returns the bars with `start <= timestamp <= end`.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> PriceSeries {
        let bars = self
            .bars
            .iter()
            .filter(|bar| bar.timestamp >= start && bar.timestamp <= end)
            .copied()
            .collect();
        self.derived(bars)
    }

    /// Returns true if both series have exactly the same timestamps.
    pub fn is_aligned_with(&self, other: &PriceSeries) -> bool {
        self.len() == other.len()
            && self
                .bars
                .iter()
                .zip(&other.bars)
                .all(|(a, b)| a.timestamp == b.timestamp)
    }

    // Subsets of a validated series are valid by construction.
    fn derived(&self, bars: Vec<Bar>) -> PriceSeries {
        PriceSeries {
            symbol: self.symbol.clone(),
            interval: self.interval,
            bars,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn series(symbol: &str, points: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_closes(symbol, points.iter().map(|&(d, c)| (day(d), c))).unwrap()
    }

    #[test]
    fn test_percentage_returns() {
        let s = series("ACME", &[(1, 100.0), (2, 102.0), (3, 101.0), (4, 105.0)]);
        let r = s.percentage_returns();
        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(r[1], -0.980_392_156_862_745, epsilon = 1e-9);
        assert_relative_eq!(r[2], 3.960_396_039_603_96, epsilon = 1e-9);
    }

    #[test]
    fn test_log_returns() {
        let s = series("ACME", &[(1, 100.0), (2, 110.0)]);
        assert_relative_eq!(s.log_returns()[0], (1.1f64).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_returns_of_single_bar_are_empty() {
        let s = series("ACME", &[(1, 100.0)]);
        assert!(s.percentage_returns().is_empty());
        assert!(s.require_len(2).is_err());
    }

    #[test]
    fn test_rejects_duplicate_timestamp() {
        let result = PriceSeries::from_closes("ACME", vec![(day(1), 1.0), (day(1), 2.0)]);
        assert!(matches!(result, Err(CoreError::DuplicateTimestamp { .. })));
    }

    #[test]
    fn test_rejects_unordered_timestamps() {
        let result = PriceSeries::from_closes("ACME", vec![(day(2), 1.0), (day(1), 2.0)]);
        assert!(matches!(result, Err(CoreError::UnorderedTimestamps { .. })));
    }

    #[test]
    fn test_inner_join() {
        let a = series("ACME", &[(1, 10.0), (2, 11.0), (4, 12.0), (5, 13.0)]);
        let b = series("SPY", &[(2, 400.0), (3, 401.0), (4, 402.0), (6, 403.0)]);

        let (a2, b2) = a.inner_join(&b);
        assert_eq!(a2.timestamps(), vec![day(2), day(4)]);
        assert!(a2.is_aligned_with(&b2));
        assert_eq!(a2.closes(), vec![11.0, 12.0]);
        assert_eq!(b2.closes(), vec![400.0, 402.0]);
        assert_eq!(b2.symbol(), "SPY");
    }

    #[test]
    fn test_between_is_inclusive() {
        let s = series("ACME", &[(1, 10.0), (2, 11.0), (3, 12.0), (4, 13.0)]);
        let sub = s.between(day(2), day(3));
        assert_eq!(sub.closes(), vec![11.0, 12.0]);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"symbol":"ACME","bars":[
            {"timestamp":"2024-01-02T00:00:00","open":1.0,"high":1.0,"low":1.0,"close":1.0},
            {"timestamp":"2024-01-01T00:00:00","open":1.0,"high":1.0,"low":1.0,"close":1.0}
        ]}"#;
        assert!(serde_json::from_str::<PriceSeries>(json).is_err());
    }
}
