//! Simulated price table and its ending-price summary.

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tickstats_math::stats::{max, mean, min, round_to};

/// Simulated prices: rows are future steps, columns are independent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloPaths {
    initial_price: f64,
    prices: Array2<f64>,
}

impl MonteCarloPaths {
    pub(crate) fn new(initial_price: f64, prices: Array2<f64>) -> Self {
        Self {
            initial_price,
            prices,
        }
    }

    /// Price every run started from.
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Number of simulated steps (rows).
    pub fn forecast_period(&self) -> usize {
        self.prices.nrows()
    }

    /// Number of runs (columns).
    pub fn simulations(&self) -> usize {
        self.prices.ncols()
    }

    /// The full `T × N` table.
    pub fn prices(&self) -> &Array2<f64> {
        &self.prices
    }

    /// Consumes the paths, returning the table.
    pub fn into_prices(self) -> Array2<f64> {
        self.prices
    }

    /// One run's path.
    ///
    /// # Panics
    ///
    /// Panics if `run >= self.simulations()`.
    pub fn path(&self, run: usize) -> ArrayView1<'_, f64> {
        self.prices.column(run)
    }

    /// Final price of each run.
    pub fn ending_prices(&self) -> Vec<f64> {
        match self.prices.nrows() {
            0 => Vec::new(),
            rows => self.prices.index_axis(Axis(0), rows - 1).to_vec(),
        }
    }

    /// Summarizes the ending prices against the initial price.
    pub fn summary(&self) -> MonteCarloSummary {
        self.summary_against(self.initial_price)
    }

    /// Summarizes the ending prices against an arbitrary reference price.
    pub fn summary_against(&self, reference_price: f64) -> MonteCarloSummary {
        MonteCarloSummary::from_ending_prices(&self.ending_prices(), reference_price)
    }
}

/// Distribution of ending prices across runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    /// Highest ending price, rounded to cents.
    #[serde(with = "crate::serde_nan")]
    pub max_ending_price: f64,
    /// Lowest ending price, rounded to cents.
    #[serde(with = "crate::serde_nan")]
    pub min_ending_price: f64,
    /// Mean ending price, rounded to cents.
    #[serde(with = "crate::serde_nan")]
    pub average_ending_price: f64,
    /// Percent of runs ending strictly above the reference price.
    pub perc_above_initial: f64,
    /// Percent of runs ending at or below it (`100 - perc_above_initial`).
    pub perc_below_initial: f64,
}

impl MonteCarloSummary {
    /// Summarizes a set of ending prices.
    ///
    /// With no prices the extremes are NaN and both percentages are zero.
    pub fn from_ending_prices(ending: &[f64], reference_price: f64) -> Self {
        if ending.is_empty() {
            return Self {
                max_ending_price: f64::NAN,
                min_ending_price: f64::NAN,
                average_ending_price: f64::NAN,
                perc_above_initial: 0.0,
                perc_below_initial: 0.0,
            };
        }

        let above = ending.iter().filter(|p| **p > reference_price).count();
        let perc_above = round_to(above as f64 / ending.len() as f64 * 100.0, 2);

        Self {
            max_ending_price: round_to(max(ending), 2),
            min_ending_price: round_to(min(ending), 2),
            average_ending_price: round_to(mean(ending), 2),
            perc_above_initial: perc_above,
            perc_below_initial: 100.0 - perc_above,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_summary_uses_last_row() {
        let paths = MonteCarloPaths::new(
            100.0,
            array![[101.0, 99.0, 100.0], [103.456, 98.0, 100.0]],
        );
        assert_eq!(paths.ending_prices(), vec![103.456, 98.0, 100.0]);

        let summary = paths.summary();
        assert_eq!(summary.max_ending_price, 103.46);
        assert_eq!(summary.min_ending_price, 98.0);
        assert_eq!(summary.average_ending_price, 100.49);
        assert_eq!(summary.perc_above_initial, 33.33);
        assert_relative_eq!(summary.perc_below_initial, 66.67, epsilon = 1e-12);
    }

    #[test]
    fn test_ending_at_initial_counts_below() {
        let summary = MonteCarloSummary::from_ending_prices(&[100.0, 100.0], 100.0);
        assert_eq!(summary.perc_above_initial, 0.0);
        assert_eq!(summary.perc_below_initial, 100.0);
    }

    #[test]
    fn test_summary_against_reference() {
        let paths = MonteCarloPaths::new(100.0, array![[90.0, 120.0]]);
        assert_eq!(paths.summary().perc_above_initial, 50.0);
        assert_eq!(paths.summary_against(80.0).perc_above_initial, 100.0);
    }
}
