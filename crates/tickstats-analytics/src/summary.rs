//! Period and candle summaries of a price series.

use serde::{Deserialize, Serialize};
use std::fmt;
use tickstats_core::PriceSeries;
use tickstats_math::stats::{max, min, round_to};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::returns::DescriptiveStats;

const PRECISION: u32 = 2;

/// Overall direction of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Last close at or above the first.
    Up,
    /// Last close below the first.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Close-to-close overview of a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Change from the first to the last close, in percent.
    pub period_change: f64,
    /// Highest close.
    pub period_max: f64,
    /// Lowest close.
    pub period_min: f64,
    /// Largest single-bar percentage return.
    pub max_gain: f64,
    /// Smallest (most negative) single-bar percentage return.
    pub max_drop: f64,
    /// Sign of `period_change`.
    pub direction: Direction,
}

/// Summarizes the closes of a series; all values rounded to 2 decimals.
///
/// # Errors
///
/// Returns `AnalyticsError::InsufficientData` for fewer than two bars.
pub fn period_summary(series: &PriceSeries) -> AnalyticsResult<PeriodSummary> {
    series.require_len(2)?;
    let closes = series.closes();
    let returns = series.percentage_returns();

    let first = closes[0];
    let last = closes[closes.len() - 1];
    let change = round_to((last - first) / first * 100.0, PRECISION);

    Ok(PeriodSummary {
        period_change: change,
        period_max: round_to(max(&closes), PRECISION),
        period_min: round_to(min(&closes), PRECISION),
        max_gain: round_to(max(&returns), PRECISION),
        max_drop: round_to(min(&returns), PRECISION),
        direction: if change >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        },
    })
}

/// Intra-bar statistics of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleStatistics {
    /// Lowest low.
    pub lowest_low: f64,
    /// Highest high.
    pub highest_high: f64,
    /// `highest_high - lowest_low`.
    pub price_range: f64,
    /// `price_range` as a percentage of `highest_high`.
    pub range_percent: f64,
    /// First open to last close, in percent.
    pub open_to_close_change: f64,
    /// `(open - close) / open · 100` per bar.
    pub body: DescriptiveStats,
    /// `(high - low) / high · 100` per bar.
    pub range: DescriptiveStats,
    /// `(open - previous close) / open · 100` per bar, 0 for the first bar.
    pub gap: DescriptiveStats,
}

/// Computes candle statistics; all values rounded to 2 decimals.
///
/// # Errors
///
/// Returns `AnalyticsError::InsufficientData` for an empty series.
pub fn candle_statistics(series: &PriceSeries) -> AnalyticsResult<CandleStatistics> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(AnalyticsError::insufficient_data(
            "candle statistics need at least one bar",
        ));
    };
    let bars = series.bars();

    let body: Vec<f64> = bars.iter().map(|b| (b.open - b.close) / b.open * 100.0).collect();
    let range: Vec<f64> = bars.iter().map(|b| (b.high - b.low) / b.high * 100.0).collect();
    let gap: Vec<f64> = std::iter::once(0.0)
        .chain(
            bars.windows(2)
                .map(|pair| (pair[1].open - pair[0].close) / pair[1].open * 100.0),
        )
        .collect();

    let lowest_low = round_to(bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min), PRECISION);
    let highest_high = round_to(
        bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
        PRECISION,
    );
    let price_range = round_to(highest_high - lowest_low, PRECISION);

    Ok(CandleStatistics {
        lowest_low,
        highest_high,
        price_range,
        range_percent: round_to(price_range / highest_high * 100.0, PRECISION),
        open_to_close_change: round_to((last.close - first.open) / first.open * 100.0, PRECISION),
        body: DescriptiveStats::of(&body).rounded(PRECISION),
        range: DescriptiveStats::of(&range).rounded(PRECISION),
        gap: DescriptiveStats::of(&gap).rounded(PRECISION),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use tickstats_core::Bar;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn sample() -> PriceSeries {
        PriceSeries::new(
            "ACME",
            vec![
                Bar::new(day(3), 100.0, 104.0, 99.0, 102.0),
                Bar::new(day(4), 103.0, 105.0, 100.0, 101.0),
                Bar::new(day(5), 100.0, 106.0, 98.0, 105.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_period_summary() {
        let summary = period_summary(&sample()).unwrap();
        assert_eq!(summary.period_change, 2.94);
        assert_eq!(summary.period_max, 105.0);
        assert_eq!(summary.period_min, 101.0);
        assert_eq!(summary.max_gain, 3.96);
        assert_eq!(summary.max_drop, -0.98);
        assert_eq!(summary.direction, Direction::Up);
    }

    #[test]
    fn test_falling_period() {
        let series = PriceSeries::from_closes("X", [(day(3), 10.0), (day(4), 9.0)]).unwrap();
        let summary = period_summary(&series).unwrap();
        assert_eq!(summary.direction, Direction::Down);
        assert_eq!(summary.period_change, -10.0);
        assert!(period_summary(&PriceSeries::from_closes("X", [(day(3), 10.0)]).unwrap()).is_err());
    }

    #[test]
    fn test_candle_statistics() {
        let stats = candle_statistics(&sample()).unwrap();
        assert_eq!(stats.lowest_low, 98.0);
        assert_eq!(stats.highest_high, 106.0);
        assert_eq!(stats.price_range, 8.0);
        assert_eq!(stats.range_percent, 7.55);
        assert_eq!(stats.open_to_close_change, 5.0);

        // Bodies: -2%, 1.9417%, -5%.
        assert_eq!(stats.body.max, 1.94);
        assert_eq!(stats.body.min, -5.0);
        // Gaps: 0, (103 - 102) / 103, (100 - 101) / 100.
        assert_eq!(stats.gap.max, 0.97);
        assert_eq!(stats.gap.min, -1.0);
        assert_eq!(stats.gap.average, -0.01);
    }

    #[test]
    fn test_single_bar_has_zero_gap() {
        let series = PriceSeries::new("X", vec![Bar::new(day(3), 10.0, 11.0, 9.0, 10.5)]).unwrap();
        let stats = candle_statistics(&series).unwrap();
        assert_eq!(stats.gap.average, 0.0);
        assert_eq!(stats.range.average, 18.18);
    }
}
