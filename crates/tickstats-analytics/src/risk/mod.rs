//! Value at Risk and Conditional VaR.
//!
//! Two methods are provided:
//!
//! - **Historical**: the lower-tail percentile of the empirical return
//!   distribution, and the mean of the returns at or below it.
//! - **Parametric**: the same quantities under a normal distribution fitted
//!   to the sample mean and sample standard deviation.
//!
//! Inputs are fractional returns; the table reports signed percentages
//! rounded to a fixed number of decimals (2 by default). A loss is negative.
//!
//! # Example
//!
//! ```rust
//! use tickstats_analytics::risk::{var_cvar_table, ConfidenceLevel, RiskMetric, VarMethod};
//!
//! let returns = [0.01, -0.02, 0.015, -0.005, 0.0, 0.02, -0.03, 0.01];
//! let table = var_cvar_table(&returns, &ConfidenceLevel::STANDARD).unwrap();
//!
//! let var95 = table
//!     .get(VarMethod::Historical, RiskMetric::VaR, ConfidenceLevel::P95)
//!     .unwrap();
//! assert!(var95 < 0.0);
//! assert!(!table.reliable);
//! ```

mod historical;
mod parametric;

pub use historical::{historical_cvar, historical_var};
pub use parametric::{parametric_cvar, parametric_var};

use serde::{Deserialize, Serialize};
use std::fmt;
use tickstats_config::RiskConfig;
use tickstats_core::PriceSeries;
use tickstats_math::stats::{mean, round_to, sample_std};
use tracing::{debug, warn};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Fewer return observations than this are flagged as unreliable.
pub const MIN_RELIABLE_OBSERVATIONS: usize = 30;

/// Decimal places of the reported percentages.
pub const DEFAULT_PRECISION: u32 = 2;

/// A confidence level strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// 95% confidence.
    pub const P95: Self = Self(0.95);
    /// 99% confidence.
    pub const P99: Self = Self(0.99);
    /// 99.9% confidence.
    pub const P999: Self = Self(0.999);

    /// The three levels reported by default.
    pub const STANDARD: [Self; 3] = [Self::P95, Self::P99, Self::P999];

    /// Creates a confidence level.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` unless `0 < level < 1`.
    pub fn new(level: f64) -> AnalyticsResult<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(AnalyticsError::invalid_parameter(format!(
                "confidence level must be strictly between 0 and 1, got {level}"
            )))
        }
    }

    /// The level as a fraction, e.g. `0.95`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability mass of the loss tail, `1 - level`.
    pub fn tail(self) -> f64 {
        1.0 - self.0
    }

    /// The level in percent without trailing zeros: `"95"`, `"99.9"`.
    pub fn label(self) -> String {
        format!("{}", round_to(self.0 * 100.0, 6))
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = AnalyticsError;

    fn try_from(value: f64) -> AnalyticsResult<Self> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> f64 {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.label())
    }
}

/// VaR estimation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarMethod {
    /// Empirical percentile of observed returns.
    Historical,
    /// Normal distribution fitted to mean and standard deviation.
    Parametric,
}

impl VarMethod {
    /// Both methods in reporting order.
    pub const ALL: [Self; 2] = [Self::Historical, Self::Parametric];
}

impl fmt::Display for VarMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Historical => write!(f, "Historical"),
            Self::Parametric => write!(f, "Parametric"),
        }
    }
}

/// Risk measure reported per method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskMetric {
    /// Value at Risk.
    VaR,
    /// Conditional VaR (expected shortfall).
    CVaR,
}

impl RiskMetric {
    /// Both metrics in reporting order.
    pub const ALL: [Self; 2] = [Self::VaR, Self::CVaR];
}

impl fmt::Display for RiskMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VaR => write!(f, "VaR"),
            Self::CVaR => write!(f, "CVaR"),
        }
    }
}

/// One table cell: a metric at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelValue {
    /// Confidence level.
    pub confidence: ConfidenceLevel,
    /// Signed percentage, rounded.
    pub value: f64,
}

/// VaR and CVaR of one method across confidence levels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodTable {
    /// VaR per level.
    pub var: Vec<LevelValue>,
    /// CVaR per level.
    pub cvar: Vec<LevelValue>,
}

impl MethodTable {
    /// Values of `metric` in level order.
    pub fn metric(&self, metric: RiskMetric) -> &[LevelValue] {
        match metric {
            RiskMetric::VaR => &self.var,
            RiskMetric::CVaR => &self.cvar,
        }
    }
}

/// Method × metric × confidence level → signed percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarCvarTable {
    /// Historical estimates.
    pub historical: MethodTable,
    /// Parametric estimates.
    pub parametric: MethodTable,
    /// Number of return observations used.
    pub observations: usize,
    /// False when there were too few observations for stable tail estimates.
    pub reliable: bool,
}

impl VarCvarTable {
    /// Estimates of one method.
    pub fn method(&self, method: VarMethod) -> &MethodTable {
        match method {
            VarMethod::Historical => &self.historical,
            VarMethod::Parametric => &self.parametric,
        }
    }

    /// Looks up a single cell.
    pub fn get(&self, method: VarMethod, metric: RiskMetric, level: ConfidenceLevel) -> Option<f64> {
        self.method(method)
            .metric(metric)
            .iter()
            .find(|cell| cell.confidence == level)
            .map(|cell| cell.value)
    }

    /// Confidence levels in table order.
    pub fn levels(&self) -> Vec<ConfidenceLevel> {
        self.historical.var.iter().map(|cell| cell.confidence).collect()
    }
}

/// Computes VaR/CVaR tables for a fixed set of confidence levels.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEngine {
    levels: Vec<ConfidenceLevel>,
    min_reliable_observations: usize,
    precision: u32,
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self {
            levels: ConfidenceLevel::STANDARD.to_vec(),
            min_reliable_observations: MIN_RELIABLE_OBSERVATIONS,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl RiskEngine {
    /// Creates an engine for the given levels with default reliability and
    /// precision settings.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidParameter` if `levels` is empty.
    pub fn new(levels: &[ConfidenceLevel]) -> AnalyticsResult<Self> {
        if levels.is_empty() {
            return Err(AnalyticsError::invalid_parameter(
                "at least one confidence level is required",
            ));
        }
        Ok(Self {
            levels: levels.to_vec(),
            ..Self::default()
        })
    }

    /// Creates an engine from the risk section of the configuration.
    pub fn from_config(config: &RiskConfig) -> AnalyticsResult<Self> {
        let levels = config
            .confidence_levels
            .iter()
            .map(|level| ConfidenceLevel::new(*level))
            .collect::<AnalyticsResult<Vec<_>>>()?;
        Ok(Self {
            min_reliable_observations: config.min_reliable_observations,
            precision: config.precision,
            ..Self::new(&levels)?
        })
    }

    /// Confidence levels this engine reports.
    pub fn levels(&self) -> &[ConfidenceLevel] {
        &self.levels
    }

    /// Computes the table from fractional returns.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InsufficientData` for fewer than two returns,
    /// where the standard deviation is undefined.
    pub fn compute(&self, returns: &[f64]) -> AnalyticsResult<VarCvarTable> {
        if returns.len() < 2 {
            return Err(AnalyticsError::insufficient_data(format!(
                "VaR needs at least 2 returns, got {}",
                returns.len()
            )));
        }

        let reliable = returns.len() >= self.min_reliable_observations;
        if !reliable {
            warn!(
                observations = returns.len(),
                minimum = self.min_reliable_observations,
                "VaR/CVaR estimated from a short sample; tail values are unreliable"
            );
        }

        let mu = mean(returns);
        let sigma = sample_std(returns);
        debug!(observations = returns.len(), mean = mu, std = sigma, "computing VaR/CVaR");

        let percent = |fraction: f64| round_to(fraction * 100.0, self.precision);
        let mut historical = MethodTable::default();
        let mut parametric = MethodTable::default();

        for &confidence in &self.levels {
            let cell = |value: f64| LevelValue {
                confidence,
                value: percent(value),
            };
            historical.var.push(cell(historical_var(returns, confidence)?));
            historical.cvar.push(cell(historical_cvar(returns, confidence)?));
            parametric.var.push(cell(parametric_var(mu, sigma, confidence)?));
            parametric.cvar.push(cell(parametric_cvar(mu, sigma, confidence)?));
        }

        Ok(VarCvarTable {
            historical,
            parametric,
            observations: returns.len(),
            reliable,
        })
    }

    /// Computes the table from the simple returns of a price series.
    pub fn compute_for_series(&self, series: &PriceSeries) -> AnalyticsResult<VarCvarTable> {
        self.compute(&series.simple_returns())
    }
}

/// Computes a VaR/CVaR table from fractional returns.
///
/// # Errors
///
/// - `AnalyticsError::InsufficientData` for fewer than two returns
/// - `AnalyticsError::InvalidParameter` if `levels` is empty
pub fn var_cvar_table(returns: &[f64], levels: &[ConfidenceLevel]) -> AnalyticsResult<VarCvarTable> {
    RiskEngine::new(levels)?.compute(returns)
}

/// Computes a VaR/CVaR table from the simple returns of a price series.
pub fn var_cvar_from_series(
    series: &PriceSeries,
    levels: &[ConfidenceLevel],
) -> AnalyticsResult<VarCvarTable> {
    RiskEngine::new(levels)?.compute_for_series(series)
}
