//! Log-return regression of a ticker against a benchmark.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tickstats_core::PriceSeries;
use tickstats_math::regression::LinearFit;
use tickstats_math::stats::{pearson_correlation, sample_variance};
use tickstats_math::MathError;
use tracing::debug;

use crate::error::{AnalyticsError, AnalyticsResult};

/// 2×2 Pearson correlation matrix of two labelled return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Row/column labels, ticker first.
    pub labels: [String; 2],
    /// Matrix entries; the diagonal is 1.
    #[serde(with = "crate::serde_nan::matrix")]
    pub values: [[f64; 2]; 2],
}

impl CorrelationMatrix {
    fn new(first: &str, second: &str, coefficient: f64) -> Self {
        Self {
            labels: [first.to_string(), second.to_string()],
            values: [[1.0, coefficient], [coefficient, 1.0]],
        }
    }

    /// The off-diagonal correlation coefficient.
    pub fn coefficient(&self) -> f64 {
        self.values[0][1]
    }

    /// Looks up an entry by row and column label.
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let index = |label: &str| self.labels.iter().position(|l| l == label);
        Some(self.values[index(row)?][index(column)?])
    }
}

/// Result of regressing ticker log returns on benchmark log returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Ticker symbol (dependent variable).
    pub ticker: String,
    /// Benchmark symbol (independent variable).
    pub benchmark: String,
    /// Timestamp of each log-return observation.
    pub timestamps: Vec<NaiveDateTime>,
    /// Ticker log returns.
    pub ticker_returns: Vec<f64>,
    /// Benchmark log returns.
    pub benchmark_returns: Vec<f64>,
    /// Correlation of the two log-return series.
    pub correlation: CorrelationMatrix,
    /// OLS slope (beta).
    pub slope: f64,
    /// OLS intercept (alpha).
    pub intercept: f64,
    /// Fitted line evaluated at each ticker log return.
    ///
    /// This is the dashboard's historical trend column. The conventional
    /// fitted line is [`RegressionResult::fitted_at_benchmark`].
    pub trend: Vec<f64>,
}

impl RegressionResult {
    /// The fitted line as a [`LinearFit`].
    pub fn fit(&self) -> LinearFit {
        LinearFit {
            slope: self.slope,
            intercept: self.intercept,
        }
    }

    /// Fitted ticker return at each benchmark log return.
    pub fn fitted_at_benchmark(&self) -> Vec<f64> {
        self.fit().evaluate_all(&self.benchmark_returns)
    }

    /// Number of paired observations.
    pub fn observations(&self) -> usize {
        self.ticker_returns.len()
    }
}

/// Regresses `ticker` log returns on `benchmark` log returns.
///
/// Both series are first restricted to their common timestamps; bars present
/// in only one of them are dropped.
///
/// # Errors
///
/// - `AnalyticsError::InsufficientData` if fewer than two log returns remain
///   after alignment
/// - `AnalyticsError::Math` if the benchmark returns have zero variance
pub fn linear_regression(
    ticker: &PriceSeries,
    benchmark: &PriceSeries,
) -> AnalyticsResult<RegressionResult> {
    let (ticker_aligned, benchmark_aligned) = ticker.inner_join(benchmark);
    if ticker_aligned.len() < ticker.len() || benchmark_aligned.len() < benchmark.len() {
        debug!(
            ticker = ticker.symbol(),
            benchmark = benchmark.symbol(),
            kept = ticker_aligned.len(),
            ticker_bars = ticker.len(),
            benchmark_bars = benchmark.len(),
            "aligned series on common timestamps"
        );
    }

    if ticker_aligned.len() < 3 {
        return Err(AnalyticsError::insufficient_data(format!(
            "regression needs at least 2 aligned log returns, got {}",
            ticker_aligned.len().saturating_sub(1)
        )));
    }

    let ticker_returns = ticker_aligned.log_returns();
    let benchmark_returns = benchmark_aligned.log_returns();

    let variance = sample_variance(&benchmark_returns);
    if variance == 0.0 {
        return Err(AnalyticsError::Math(MathError::DivisionByZero { value: variance }));
    }

    // A flat ticker has an undefined correlation but a well-defined fit.
    let coefficient = match pearson_correlation(&ticker_returns, &benchmark_returns) {
        Ok(value) => value,
        Err(MathError::DivisionByZero { .. }) => f64::NAN,
        Err(err) => return Err(err.into()),
    };

    let fit = LinearFit::fit(&benchmark_returns, &ticker_returns)?;
    let trend = fit.evaluate_all(&ticker_returns);

    Ok(RegressionResult {
        ticker: ticker.symbol().to_string(),
        benchmark: benchmark.symbol().to_string(),
        timestamps: ticker_aligned.timestamps().into_iter().skip(1).collect(),
        correlation: CorrelationMatrix::new(ticker.symbol(), benchmark.symbol(), coefficient),
        slope: fit.slope,
        intercept: fit.intercept,
        trend,
        ticker_returns,
        benchmark_returns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn series(symbol: &str, points: &[(u32, f64)]) -> PriceSeries {
        PriceSeries::from_closes(symbol, points.iter().map(|(d, c)| (day(*d), *c))).unwrap()
    }

    #[test]
    fn test_perfectly_proportional_returns() {
        // Ticker log returns are exactly twice the benchmark's.
        let bench = [100.0, 101.0, 99.0, 103.0, 102.0];
        let ticker: Vec<f64> = bench.iter().map(|c: &f64| (c / 100.0).powi(2) * 50.0).collect();
        let b = series("IDX", &bench.iter().enumerate().map(|(i, c)| (i as u32 + 1, *c)).collect::<Vec<_>>());
        let t = series("ACME", &ticker.iter().enumerate().map(|(i, c)| (i as u32 + 1, *c)).collect::<Vec<_>>());

        let result = linear_regression(&t, &b).unwrap();
        assert_eq!(result.observations(), 4);
        assert_relative_eq!(result.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(result.intercept, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.correlation.coefficient(), 1.0, epsilon = 1e-12);
        assert_eq!(result.correlation.get("ACME", "IDX"), Some(result.correlation.coefficient()));
        assert_eq!(result.correlation.get("IDX", "IDX"), Some(1.0));
        assert_eq!(result.correlation.get("XYZ", "IDX"), None);
    }

    #[test]
    fn test_trend_evaluated_at_ticker_returns() {
        let t = series("A", &[(1, 10.0), (2, 11.0), (3, 10.5), (4, 12.0), (5, 11.0)]);
        let b = series("B", &[(1, 20.0), (2, 20.5), (3, 20.1), (4, 21.0), (5, 21.4)]);
        let result = linear_regression(&t, &b).unwrap();

        for (trend, x) in result.trend.iter().zip(&result.ticker_returns) {
            assert_relative_eq!(*trend, result.slope * x + result.intercept, epsilon = 1e-15);
        }
        for (fitted, x) in result.fitted_at_benchmark().iter().zip(&result.benchmark_returns) {
            assert_relative_eq!(*fitted, result.slope * x + result.intercept, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_misaligned_series_are_joined() {
        let t = series("A", &[(1, 10.0), (2, 11.0), (4, 10.5), (5, 12.0), (6, 11.0)]);
        let b = series("B", &[(1, 20.0), (3, 20.5), (4, 20.1), (5, 21.0), (6, 21.4)]);
        let result = linear_regression(&t, &b).unwrap();

        assert_eq!(result.timestamps, vec![day(4), day(5), day(6)]);
        assert_relative_eq!(result.ticker_returns[0], (10.5f64 / 10.0).ln(), epsilon = 1e-15);
    }

    #[test]
    fn test_disjoint_series_are_insufficient() {
        let t = series("A", &[(1, 10.0), (3, 11.0), (5, 12.0)]);
        let b = series("B", &[(2, 10.0), (4, 11.0), (6, 12.0)]);
        assert!(linear_regression(&t, &b).unwrap_err().is_insufficient_data());
    }

    #[test]
    fn test_flat_benchmark_is_math_error() {
        let t = series("A", &[(1, 10.0), (2, 11.0), (3, 12.0)]);
        let b = series("B", &[(1, 5.0), (2, 5.0), (3, 5.0)]);
        assert!(matches!(
            linear_regression(&t, &b),
            Err(AnalyticsError::Math(MathError::DivisionByZero { .. }))
        ));
    }

    #[test]
    fn test_flat_ticker_has_nan_correlation() {
        let t = series("A", &[(1, 10.0), (2, 10.0), (3, 10.0), (4, 10.0)]);
        let b = series("B", &[(1, 5.0), (2, 5.5), (3, 5.2), (4, 5.9)]);
        let result = linear_regression(&t, &b).unwrap();
        assert!(result.correlation.coefficient().is_nan());
        assert_relative_eq!(result.slope, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_correlation_survives_json() {
        let t = series("A", &[(1, 10.0), (2, 10.0), (3, 10.0), (4, 10.0)]);
        let b = series("B", &[(1, 5.0), (2, 5.5), (3, 5.2), (4, 5.9)]);
        let result = linear_regression(&t, &b).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: RegressionResult = serde_json::from_str(&json).unwrap();
        assert!(back.correlation.coefficient().is_nan());
        assert_eq!(back.correlation.get("A", "A"), Some(1.0));
        assert_relative_eq!(back.slope, result.slope, epsilon = 1e-12);
        assert_eq!(back.timestamps, result.timestamps);
    }
}
