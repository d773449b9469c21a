//! Path generation.

use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tickstats_config::SimulationConfig;
use tickstats_core::PriceSeries;
use tracing::debug;

use super::{MonteCarloPaths, ReturnDistribution};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Generates `simulations` independent price paths of `forecast_period` steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulator")]
pub struct MonteCarloSimulator {
    distribution: ReturnDistribution,
    initial_price: f64,
    simulations: usize,
    forecast_period: usize,
}

#[derive(Deserialize)]
struct RawSimulator {
    distribution: ReturnDistribution,
    initial_price: f64,
    simulations: usize,
    forecast_period: usize,
}

impl TryFrom<RawSimulator> for MonteCarloSimulator {
    type Error = AnalyticsError;

    fn try_from(raw: RawSimulator) -> AnalyticsResult<Self> {
        Self::new(
            raw.distribution,
            raw.initial_price,
            raw.simulations,
            raw.forecast_period,
        )
    }
}

impl MonteCarloSimulator {
    /// Creates a simulator.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` if `simulations` or
    /// `forecast_period` is zero, or the initial price is not a positive
    /// finite number.
    pub fn new(
        distribution: ReturnDistribution,
        initial_price: f64,
        simulations: usize,
        forecast_period: usize,
    ) -> AnalyticsResult<Self> {
        if simulations == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "number of simulations must be positive",
            ));
        }
        if forecast_period == 0 {
            return Err(AnalyticsError::invalid_parameter(
                "forecast period must be positive",
            ));
        }
        if !(initial_price.is_finite() && initial_price > 0.0) {
            return Err(AnalyticsError::invalid_parameter(format!(
                "initial price must be positive and finite, got {initial_price}"
            )));
        }

        Ok(Self {
            distribution,
            initial_price,
            simulations,
            forecast_period,
        })
    }

    /// Creates a simulator seeded from a series: the return distribution of
    /// its simple returns and its last close as the initial price.
    pub fn from_series(
        series: &PriceSeries,
        simulations: usize,
        forecast_period: usize,
    ) -> AnalyticsResult<Self> {
        let distribution = ReturnDistribution::from_series(series)?;
        let initial_price = series
            .last_close()
            .ok_or_else(|| AnalyticsError::insufficient_data("empty price series"))?;
        Self::new(distribution, initial_price, simulations, forecast_period)
    }

    /// Like [`MonteCarloSimulator::from_series`] with sizes from configuration.
    pub fn from_config(series: &PriceSeries, config: &SimulationConfig) -> AnalyticsResult<Self> {
        Self::from_series(series, config.simulations, config.forecast_period)
    }

    /// The per-step return distribution.
    pub fn distribution(&self) -> ReturnDistribution {
        self.distribution
    }

    /// Price each run starts from.
    pub fn initial_price(&self) -> f64 {
        self.initial_price
    }

    /// Number of runs.
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    /// Steps per run.
    pub fn forecast_period(&self) -> usize {
        self.forecast_period
    }

    /// Generates all runs from a single random source.
    ///
    /// Runs are drawn one after another, each consuming `forecast_period`
    /// normals, so a seeded generator reproduces the table exactly.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> MonteCarloPaths {
        debug!(
            simulations = self.simulations,
            forecast_period = self.forecast_period,
            "simulating price paths"
        );

        let mut prices = Array2::zeros((self.forecast_period, self.simulations));
        for mut column in prices.axis_iter_mut(Axis(1)) {
            let mut price = self.initial_price;
            for cell in column.iter_mut() {
                price = self.step(price, rng);
                *cell = price;
            }
        }
        MonteCarloPaths::new(self.initial_price, prices)
    }

    /// Generates runs on the rayon thread pool.
    ///
    /// Each run gets its own generator seeded from a stream drawn from
    /// `seed`, so the table depends only on `seed`.
    pub fn simulate_parallel(&self, seed: u64) -> MonteCarloPaths {
        debug!(
            simulations = self.simulations,
            forecast_period = self.forecast_period,
            seed,
            "simulating price paths in parallel"
        );

        let mut master = StdRng::seed_from_u64(seed);
        let run_seeds: Vec<u64> = (0..self.simulations).map(|_| master.gen()).collect();

        let runs: Vec<Vec<f64>> = run_seeds
            .par_iter()
            .map(|&run_seed| {
                let mut rng = StdRng::seed_from_u64(run_seed);
                let mut price = self.initial_price;
                (0..self.forecast_period)
                    .map(|_| {
                        price = self.step(price, &mut rng);
                        price
                    })
                    .collect()
            })
            .collect();

        let mut prices = Array2::zeros((self.forecast_period, self.simulations));
        for (mut column, run) in prices.axis_iter_mut(Axis(1)).zip(runs) {
            for (cell, price) in column.iter_mut().zip(run) {
                *cell = price;
            }
        }
        MonteCarloPaths::new(self.initial_price, prices)
    }

    fn step<R: Rng + ?Sized>(&self, price: f64, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        price * (1.0 + self.distribution.mean + self.distribution.std * z)
    }
}
