//! Configured entry point bundling every statistic.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tickstats_config::{EngineConfig, Validate};
use tickstats_core::PriceSeries;
use tracing::{debug, warn};

use crate::distribution::{DistributionBinner, ReturnDistributionTable};
use crate::error::AnalyticsResult;
use crate::indicators::IndicatorSet;
use crate::montecarlo::{MonteCarloPaths, MonteCarloSimulator, MonteCarloSummary};
use crate::ratings::{Fundamentals, RadarRatings};
use crate::regression::{linear_regression, RegressionResult};
use crate::returns::{percentage_returns_statistics, ReturnsSummary};
use crate::risk::{RiskEngine, VarCvarTable};
use crate::summary::{candle_statistics, period_summary, CandleStatistics, PeriodSummary};

/// Everything the statistics tab shows for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Symbol of the analysed series.
    pub symbol: String,
    /// Number of bars analysed.
    pub bars: usize,
    /// Close-to-close overview.
    pub period: PeriodSummary,
    /// Intra-bar statistics.
    pub candles: CandleStatistics,
    /// Percentage-return statistics.
    pub returns: ReturnsSummary,
    /// Regression against the benchmark, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<RegressionResult>,
    /// VaR/CVaR table.
    pub risk: VarCvarTable,
    /// Monte Carlo ending-price summary.
    pub monte_carlo: MonteCarloSummary,
    /// Histogram of percentage returns.
    pub distribution: ReturnDistributionTable,
}

/// Stateless statistics engine driven by an [`EngineConfig`].
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    config: EngineConfig,
    risk: RiskEngine,
    binner: DistributionBinner,
}

impl StatisticsEngine {
    /// Validates `config` and builds the engine.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` if the configuration does
    /// not validate.
    pub fn new(config: EngineConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        let risk = RiskEngine::from_config(&config.risk)?;
        let binner = DistributionBinner::from_config(&config.binning);
        Ok(Self {
            config,
            risk,
            binner,
        })
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Percentage-return statistics.
    pub fn returns(&self, series: &PriceSeries) -> AnalyticsResult<ReturnsSummary> {
        percentage_returns_statistics(series)
    }

    /// Log-return regression of `ticker` on `benchmark`.
    pub fn regression(
        &self,
        ticker: &PriceSeries,
        benchmark: &PriceSeries,
    ) -> AnalyticsResult<RegressionResult> {
        linear_regression(ticker, benchmark)
    }

    /// VaR/CVaR table at the configured confidence levels.
    pub fn risk(&self, series: &PriceSeries) -> AnalyticsResult<VarCvarTable> {
        self.risk.compute_for_series(series)
    }

    /// Simulator sized by the configuration and seeded from `series`.
    pub fn simulator(&self, series: &PriceSeries) -> AnalyticsResult<MonteCarloSimulator> {
        MonteCarloSimulator::from_config(series, &self.config.simulation)
    }

    /// Runs the Monte Carlo simulation.
    ///
    /// Uses the configured seed when present and OS entropy otherwise; runs
    /// on the rayon pool when `simulation.parallel` is set.
    pub fn simulate(&self, series: &PriceSeries) -> AnalyticsResult<MonteCarloPaths> {
        let simulator = self.simulator(series)?;
        let settings = &self.config.simulation;
        let paths = match (settings.parallel, settings.seed) {
            (true, Some(seed)) => simulator.simulate_parallel(seed),
            (true, None) => {
                let seed = rand::random();
                debug!(seed, "no simulation seed configured; drew one from entropy");
                simulator.simulate_parallel(seed)
            }
            (false, Some(seed)) => simulator.simulate(&mut StdRng::seed_from_u64(seed)),
            (false, None) => simulator.simulate(&mut StdRng::from_entropy()),
        };
        Ok(paths)
    }

    /// Histogram of percentage returns.
    pub fn distribution(&self, series: &PriceSeries) -> AnalyticsResult<ReturnDistributionTable> {
        self.binner.bin_series(series)
    }

    /// Chart indicators at the configured windows.
    pub fn indicators(&self, series: &PriceSeries) -> AnalyticsResult<IndicatorSet> {
        IndicatorSet::compute(series, &self.config.indicators)
    }

    /// Radar ratings for `series` and caller-supplied fundamentals.
    pub fn ratings(&self, series: &PriceSeries, fundamentals: &Fundamentals) -> RadarRatings {
        RadarRatings::compute(series, fundamentals)
    }

    /// Computes the full report.
    ///
    /// A benchmark that fails to regress (too little overlap, flat prices)
    /// is logged and left out rather than failing the report.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InsufficientData` for fewer than three bars
    /// (two returns), or any error of the individual statistics on `series`.
    pub fn report(
        &self,
        series: &PriceSeries,
        benchmark: Option<&PriceSeries>,
    ) -> AnalyticsResult<StatisticsReport> {
        series.require_len(3)?;
        debug!(symbol = series.symbol(), bars = series.len(), "building statistics report");

        let regression = match benchmark {
            Some(benchmark) => match self.regression(series, benchmark) {
                Ok(result) => Some(result),
                Err(err) => {
                    warn!(
                        symbol = series.symbol(),
                        benchmark = benchmark.symbol(),
                        error = %err,
                        "skipping regression"
                    );
                    None
                }
            },
            None => None,
        };

        Ok(StatisticsReport {
            symbol: series.symbol().to_string(),
            bars: series.len(),
            period: period_summary(series)?,
            candles: candle_statistics(series)?,
            returns: self.returns(series)?,
            regression,
            risk: self.risk(series)?,
            monte_carlo: self.simulate(series)?.summary(),
            distribution: self.distribution(series)?,
        })
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self {
            config: EngineConfig::standard(),
            risk: RiskEngine::default(),
            binner: DistributionBinner::default(),
        }
    }
}
