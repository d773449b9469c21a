//! Radar ratings: five 0–5 scores summarizing a stock.
//!
//! Stability is computed from prices; the other four come from fundamentals
//! supplied by the caller. A missing metric scores 0.

use serde::{Deserialize, Serialize};
use tickstats_core::PriceSeries;
use tickstats_math::stats::sample_std;

/// Fundamental metrics feeding the non-price ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Trailing price/earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Debt-to-equity in percent (150 means 1.5×).
    pub debt_to_equity: Option<f64>,
    /// Trailing annual dividend yield as a fraction.
    pub dividend_yield: Option<f64>,
    /// Forward earnings per share.
    pub forward_eps: Option<f64>,
}

/// The five radar scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarRatings {
    /// Cheapness by P/E.
    pub value: u8,
    /// Balance-sheet leverage.
    pub debt: u8,
    /// Low price volatility.
    pub stability: u8,
    /// Dividend yield.
    pub dividend: u8,
    /// Forward earnings.
    pub outlook: u8,
}

impl RadarRatings {
    /// Rates `series` and `fundamentals`.
    pub fn compute(series: &PriceSeries, fundamentals: &Fundamentals) -> Self {
        Self {
            value: value_rating(fundamentals.trailing_pe),
            debt: debt_rating(fundamentals.debt_to_equity),
            stability: stability_rating(series),
            dividend: dividend_rating(fundamentals.dividend_yield),
            outlook: outlook_rating(fundamentals.forward_eps),
        }
    }

    /// Scores in radar order: value, debt, stability, dividend, outlook.
    pub fn as_array(&self) -> [u8; 5] {
        [self.value, self.debt, self.stability, self.dividend, self.outlook]
    }
}

fn known(metric: Option<f64>) -> Option<f64> {
    metric.filter(|v| v.is_finite())
}

/// Volatility over the period: `std(log returns) · sqrt(bar count)`.
///
/// `None` with fewer than two log returns.
pub fn period_volatility(series: &PriceSeries) -> Option<f64> {
    let returns = series.log_returns();
    if returns.len() < 2 {
        return None;
    }
    Some(sample_std(&returns) * (series.len() as f64).sqrt())
}

/// 5 below 30% period volatility, down to 1 at 70% or more.
pub fn stability_rating(series: &PriceSeries) -> u8 {
    match period_volatility(series) {
        None => 0,
        Some(v) if v < 0.3 => 5,
        Some(v) if v < 0.4 => 4,
        Some(v) if v < 0.6 => 3,
        Some(v) if v < 0.7 => 2,
        Some(_) => 1,
    }
}

/// 5 for a P/E below 20, down to 1 at 70 or more.
pub fn value_rating(trailing_pe: Option<f64>) -> u8 {
    match known(trailing_pe) {
        None => 0,
        Some(pe) if pe < 20.0 => 5,
        Some(pe) if pe < 30.0 => 4,
        Some(pe) if pe < 50.0 => 3,
        Some(pe) if pe < 70.0 => 2,
        Some(_) => 1,
    }
}

/// 5 for debt below a quarter of equity, down to 1 at three times or more.
pub fn debt_rating(debt_to_equity_percent: Option<f64>) -> u8 {
    match known(debt_to_equity_percent).map(|pct| pct / 100.0) {
        None => 0,
        Some(ratio) if ratio < 0.25 => 5,
        Some(ratio) if ratio < 0.5 => 4,
        Some(ratio) if ratio < 1.0 => 3,
        Some(ratio) if ratio < 3.0 => 2,
        Some(_) => 1,
    }
}

/// 5 above a 5% yield; 0 for no dividend.
pub fn dividend_rating(dividend_yield: Option<f64>) -> u8 {
    match known(dividend_yield).map(|y| y * 100.0) {
        Some(pct) if pct > 5.0 => 5,
        Some(pct) if pct > 3.0 => 4,
        Some(pct) if pct > 2.0 => 3,
        Some(pct) if pct > 1.0 => 2,
        Some(pct) if pct > 0.0 => 1,
        _ => 0,
    }
}

/// 5 for forward EPS above 15, down to 1 at 4 or less.
pub fn outlook_rating(forward_eps: Option<f64>) -> u8 {
    match known(forward_eps) {
        None => 0,
        Some(eps) if eps > 15.0 => 5,
        Some(eps) if eps > 12.0 => 4,
        Some(eps) if eps > 8.0 => 3,
        Some(eps) if eps > 4.0 => 2,
        Some(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        PriceSeries::from_closes(
            "TEST",
            closes
                .iter()
                .enumerate()
                .map(|(i, c)| (start + Duration::days(i as i64), *c)),
        )
        .unwrap()
    }

    #[test]
    fn test_fundamental_thresholds() {
        assert_eq!(value_rating(Some(15.0)), 5);
        assert_eq!(value_rating(Some(20.0)), 4);
        assert_eq!(value_rating(Some(69.9)), 2);
        assert_eq!(value_rating(Some(120.0)), 1);
        assert_eq!(value_rating(None), 0);
        assert_eq!(value_rating(Some(f64::NAN)), 0);

        assert_eq!(debt_rating(Some(20.0)), 5);
        assert_eq!(debt_rating(Some(75.0)), 3);
        assert_eq!(debt_rating(Some(300.0)), 1);

        assert_eq!(dividend_rating(Some(0.06)), 5);
        assert_eq!(dividend_rating(Some(0.015)), 2);
        assert_eq!(dividend_rating(Some(0.0)), 0);
        assert_eq!(dividend_rating(None), 0);

        assert_eq!(outlook_rating(Some(16.0)), 5);
        assert_eq!(outlook_rating(Some(4.0)), 1);
        assert_eq!(outlook_rating(Some(-2.0)), 1);
    }

    #[test]
    fn test_stability() {
        let calm: Vec<f64> = (0..250).map(|i| 100.0 + if i % 2 == 0 { 0.1 } else { -0.1 }).collect();
        assert_eq!(stability_rating(&series(&calm)), 5);

        let wild: Vec<f64> = (0..250).map(|i| if i % 2 == 0 { 100.0 } else { 110.0 }).collect();
        assert_eq!(stability_rating(&series(&wild)), 1);

        assert_eq!(stability_rating(&series(&[100.0, 101.0])), 0);
    }

    #[test]
    fn test_compute() {
        let fundamentals = Fundamentals {
            trailing_pe: Some(25.0),
            debt_to_equity: None,
            dividend_yield: Some(0.025),
            forward_eps: Some(9.0),
        };
        let ratings = RadarRatings::compute(&series(&[100.0, 100.5, 100.2, 100.4]), &fundamentals);
        assert_eq!(ratings.as_array(), [4, 0, 5, 3, 3]);
    }
}
