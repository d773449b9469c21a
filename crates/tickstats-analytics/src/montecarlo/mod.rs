//! Monte Carlo price-path simulation.
//!
//! Each run compounds `T` independent normal returns onto the initial price:
//! `p[t] = p[t-1] * (1 + r[t])`, `r[t] ~ N(μ, σ)`. The output is a `T × N`
//! table (one column per run) that excludes the initial price itself.
//!
//! Randomness is always injected: [`MonteCarloSimulator::simulate`] takes any
//! [`rand::Rng`], and [`MonteCarloSimulator::simulate_parallel`] derives one
//! seed per run from a master seed so the result does not depend on the
//! number of worker threads.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tickstats_analytics::montecarlo::{MonteCarloSimulator, ReturnDistribution};
//!
//! let distribution = ReturnDistribution::new(0.0005, 0.01).unwrap();
//! let simulator = MonteCarloSimulator::new(distribution, 100.0, 50, 20).unwrap();
//!
//! let paths = simulator.simulate(&mut StdRng::seed_from_u64(7));
//! assert_eq!(paths.forecast_period(), 20);
//! assert_eq!(paths.simulations(), 50);
//!
//! let summary = paths.summary();
//! assert!(summary.min_ending_price <= summary.max_ending_price);
//! ```

mod paths;
mod simulator;

pub use paths::{MonteCarloPaths, MonteCarloSummary};
pub use simulator::MonteCarloSimulator;

use serde::{Deserialize, Serialize};
use tickstats_core::PriceSeries;
use tickstats_math::stats::{mean, sample_std};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Normal distribution of per-step fractional returns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReturnDistribution")]
pub struct ReturnDistribution {
    /// Mean return per step.
    pub mean: f64,
    /// Standard deviation of the return per step.
    pub std: f64,
}

#[derive(Deserialize)]
struct RawReturnDistribution {
    mean: f64,
    std: f64,
}

impl TryFrom<RawReturnDistribution> for ReturnDistribution {
    type Error = AnalyticsError;

    fn try_from(raw: RawReturnDistribution) -> AnalyticsResult<Self> {
        Self::new(raw.mean, raw.std)
    }
}

impl ReturnDistribution {
    /// Creates a distribution from explicit moments.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` unless `mean` is finite and
    /// `std` is finite and non-negative.
    pub fn new(mean: f64, std: f64) -> AnalyticsResult<Self> {
        if !mean.is_finite() {
            return Err(AnalyticsError::invalid_parameter(format!(
                "mean return must be finite, got {mean}"
            )));
        }
        if !(std.is_finite() && std >= 0.0) {
            return Err(AnalyticsError::invalid_parameter(format!(
                "return volatility must be finite and non-negative, got {std}"
            )));
        }
        Ok(Self { mean, std })
    }

    /// Fits the sample mean and sample standard deviation of `returns`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InsufficientData` for fewer than two returns.
    pub fn from_returns(returns: &[f64]) -> AnalyticsResult<Self> {
        if returns.len() < 2 {
            return Err(AnalyticsError::insufficient_data(format!(
                "return distribution needs at least 2 returns, got {}",
                returns.len()
            )));
        }
        Self::new(mean(returns), sample_std(returns))
    }

    /// Fits the simple returns of a price series.
    pub fn from_series(series: &PriceSeries) -> AnalyticsResult<Self> {
        Self::from_returns(&series.simple_returns())
    }

    /// Returns true when every draw equals the mean.
    pub fn is_degenerate(&self) -> bool {
        self.std == 0.0
    }
}
