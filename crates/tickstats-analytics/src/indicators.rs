//! Chart indicators: moving average, Bollinger Bands, stochastic oscillator
//! and MACD.
//!
//! Rolling indicators return one entry per bar; positions inside the warm-up
//! window are `None`.

use serde::{Deserialize, Serialize};
use tickstats_config::IndicatorConfig;
use tickstats_core::PriceSeries;
use tickstats_math::stats::{mean, population_std};

use crate::error::{AnalyticsError, AnalyticsResult};

fn check_window(name: &str, window: usize) -> AnalyticsResult<()> {
    if window == 0 {
        return Err(AnalyticsError::invalid_parameter(format!(
            "{name} window must be positive"
        )));
    }
    Ok(())
}

/// Rolling statistic over complete windows of `window` values.
fn rolling(values: &[f64], window: usize, stat: impl Fn(&[f64]) -> f64) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window <= values.len() {
        for (end, slice) in (window - 1..).zip(values.windows(window)) {
            out[end] = Some(stat(slice));
        }
    }
    out
}

/// Simple moving average of `values`.
pub fn moving_average(values: &[f64], window: usize) -> AnalyticsResult<Vec<Option<f64>>> {
    check_window("moving average", window)?;
    Ok(rolling(values, window, mean))
}

/// Simple moving average of a series' closes.
pub fn simple_moving_average(
    series: &PriceSeries,
    window: usize,
) -> AnalyticsResult<Vec<Option<f64>>> {
    moving_average(&series.closes(), window)
}

/// Exponential moving average with `α = 2 / (span + 1)`.
///
/// Seeded with the first value and without bias adjustment, so it is defined
/// from the first position.
pub fn exponential_moving_average(values: &[f64], span: usize) -> AnalyticsResult<Vec<f64>> {
    check_window("EMA", span)?;
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut previous: Option<f64> = None;
    for &value in values {
        let next = match previous {
            Some(p) => alpha * value + (1.0 - alpha) * p,
            None => value,
        };
        out.push(next);
        previous = Some(next);
    }
    Ok(out)
}

/// Bollinger Bands over the typical price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    /// Rolling mean of the typical price.
    pub middle: Vec<Option<f64>>,
    /// `middle + k·σ`.
    pub upper: Vec<Option<f64>>,
    /// `middle - k·σ`.
    pub lower: Vec<Option<f64>>,
}

/// Bollinger Bands of `window` bars at `num_std` population standard deviations.
pub fn bollinger_bands(
    series: &PriceSeries,
    window: usize,
    num_std: f64,
) -> AnalyticsResult<BollingerBands> {
    check_window("Bollinger", window)?;
    if !(num_std.is_finite() && num_std > 0.0) {
        return Err(AnalyticsError::invalid_parameter(format!(
            "Bollinger width must be positive, got {num_std}"
        )));
    }

    let typical: Vec<f64> = series.bars().iter().map(|b| b.typical_price()).collect();
    let middle = rolling(&typical, window, mean);
    let std = rolling(&typical, window, population_std);

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(&std)
            .map(|(m, s)| Some((*m)? + sign * num_std * (*s)?))
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    Ok(BollingerBands {
        middle,
        upper,
        lower,
    })
}

/// Stochastic oscillator lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    /// `%K`: close within the look-back high/low range, in percent.
    pub k: Vec<Option<f64>>,
    /// `%D`: moving average of `%K`.
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator with a `length`-bar look-back and `slowing`-bar `%D`.
///
/// `%K` is undefined where the look-back range is flat, and `%D` wherever
/// its window contains an undefined `%K`.
pub fn stochastic(series: &PriceSeries, length: usize, slowing: usize) -> AnalyticsResult<Stochastic> {
    check_window("stochastic", length)?;
    check_window("stochastic slowing", slowing)?;

    let bars = series.bars();
    let mut k = vec![None; bars.len()];
    if length <= bars.len() {
        for (end, window) in (length - 1..).zip(bars.windows(length)) {
            let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
            let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
            let range = highest - lowest;
            if range > 0.0 {
                k[end] = Some((bars[end].close - lowest) * 100.0 / range);
            }
        }
    }

    let mut d = vec![None; k.len()];
    if slowing <= k.len() {
        for (end, window) in (slowing - 1..).zip(k.windows(slowing)) {
            let values: Option<Vec<f64>> = window.iter().copied().collect();
            d[end] = values.map(|v| mean(&v));
        }
    }

    Ok(Stochastic { k, d })
}

/// MACD lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    /// Fast EMA of closes.
    pub fast_ema: Vec<f64>,
    /// Slow EMA of closes.
    pub slow_ema: Vec<f64>,
    /// `fast_ema - slow_ema`.
    pub macd: Vec<f64>,
}

/// MACD of closes with the given EMA spans.
pub fn macd(series: &PriceSeries, fast: usize, slow: usize) -> AnalyticsResult<Macd> {
    if fast >= slow {
        return Err(AnalyticsError::invalid_parameter(format!(
            "MACD fast span ({fast}) must be shorter than the slow span ({slow})"
        )));
    }
    let closes = series.closes();
    let fast_ema = exponential_moving_average(&closes, fast)?;
    let slow_ema = exponential_moving_average(&closes, slow)?;
    let macd = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    Ok(Macd {
        fast_ema,
        slow_ema,
        macd,
    })
}

/// Every indicator computed with one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Moving average of closes.
    pub moving_average: Vec<Option<f64>>,
    /// Bollinger Bands.
    pub bollinger: BollingerBands,
    /// Stochastic oscillator.
    pub stochastic: Stochastic,
    /// MACD.
    pub macd: Macd,
}

impl IndicatorSet {
    /// Computes all indicators for `series`.
    pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> AnalyticsResult<Self> {
        Ok(Self {
            moving_average: simple_moving_average(series, config.ma_length)?,
            bollinger: bollinger_bands(series, config.bollinger_length, config.bollinger_std_dev)?,
            stochastic: stochastic(series, config.stochastic_length, config.stochastic_slowing)?,
            macd: macd(series, config.macd_fast, config.macd_slow)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{NaiveDate, NaiveDateTime};
    use tickstats_core::Bar;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ohlc(rows: &[(f64, f64, f64, f64)]) -> PriceSeries {
        let bars = rows
            .iter()
            .enumerate()
            .map(|(i, (o, h, l, c))| Bar::new(day(i as u32 + 1), *o, *h, *l, *c))
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    #[test]
    fn test_moving_average_warm_up() {
        let ma = moving_average(&[1.0, 2.0, 3.0, 4.0], 3).unwrap();
        assert_eq!(ma, vec![None, None, Some(2.0), Some(3.0)]);
        assert_eq!(moving_average(&[1.0], 3).unwrap(), vec![None]);
        assert!(moving_average(&[1.0], 0).is_err());
    }

    #[test]
    fn test_ema_seeded_with_first_value() {
        let ema = exponential_moving_average(&[10.0, 20.0, 20.0], 3).unwrap();
        assert_eq!(ema[0], 10.0);
        assert_relative_eq!(ema[1], 15.0);
        assert_relative_eq!(ema[2], 17.5);
    }

    #[test]
    fn test_bollinger_on_typical_price() {
        let series = ohlc(&[
            (1.0, 3.0, 0.0, 3.0),
            (1.0, 4.0, 1.0, 4.0),
            (1.0, 5.0, 2.0, 5.0),
        ]);
        // Typical prices 2, 3, 4: mean 3, population std sqrt(2/3).
        let bands = bollinger_bands(&series, 3, 2.0).unwrap();
        assert_eq!(bands.middle[1], None);
        assert_relative_eq!(bands.middle[2].unwrap(), 3.0, epsilon = 1e-12);
        let width = 2.0 * (2.0f64 / 3.0).sqrt();
        assert_relative_eq!(bands.upper[2].unwrap(), 3.0 + width, epsilon = 1e-12);
        assert_relative_eq!(bands.lower[2].unwrap(), 3.0 - width, epsilon = 1e-12);
        assert!(bollinger_bands(&series, 3, 0.0).is_err());
    }

    #[test]
    fn test_stochastic() {
        let series = ohlc(&[
            (10.0, 12.0, 9.0, 11.0),
            (11.0, 13.0, 10.0, 12.0),
            (12.0, 14.0, 11.0, 13.0),
            (13.0, 13.0, 8.0, 9.0),
        ]);
        let stoch = stochastic(&series, 2, 2).unwrap();
        assert_eq!(stoch.k[0], None);
        // Bar 1: low 9, high 13, close 12 -> 75.
        assert_relative_eq!(stoch.k[1].unwrap(), 75.0, epsilon = 1e-12);
        // Bar 2: low 10, high 14, close 13 -> 75.
        assert_relative_eq!(stoch.k[2].unwrap(), 75.0, epsilon = 1e-12);
        // Bar 3: low 8, high 14, close 9 -> 16.67.
        assert_relative_eq!(stoch.k[3].unwrap(), 100.0 / 6.0, epsilon = 1e-12);
        assert_eq!(stoch.d[1], None);
        assert_relative_eq!(stoch.d[2].unwrap(), 75.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stochastic_flat_range_is_undefined() {
        let series = ohlc(&[(5.0, 5.0, 5.0, 5.0), (5.0, 5.0, 5.0, 5.0)]);
        let stoch = stochastic(&series, 2, 1).unwrap();
        assert_eq!(stoch.k, vec![None, None]);
        assert_eq!(stoch.d, vec![None, None]);
    }

    #[test]
    fn test_macd() {
        let series = ohlc(&[
            (1.0, 1.0, 1.0, 1.0),
            (2.0, 2.0, 2.0, 2.0),
            (3.0, 3.0, 3.0, 3.0),
        ]);
        let m = macd(&series, 1, 3).unwrap();
        assert_eq!(m.fast_ema, vec![1.0, 2.0, 3.0]);
        assert_relative_eq!(m.macd[1], 2.0 - 1.5);
        assert_eq!(m.macd[0], 0.0);
        assert!(macd(&series, 26, 12).is_err());
    }

    #[test]
    fn test_indicator_set_lengths() {
        let rows: Vec<(f64, f64, f64, f64)> = (0..40)
            .map(|i| {
                let c = 100.0 + f64::from(i % 7) - f64::from(i % 3);
                (c, c + 1.0, c - 1.0, c)
            })
            .collect();
        let series = ohlc(&rows[..28]);
        let set = IndicatorSet::compute(&series, &IndicatorConfig::default()).unwrap();
        assert_eq!(set.moving_average.len(), 28);
        assert_eq!(set.bollinger.middle.iter().filter(|v| v.is_some()).count(), 9);
        assert_eq!(set.macd.macd.len(), 28);
    }
}
