//! # tickstats Analytics
//!
//! The statistics engine: pure functions that turn an OHLC [`PriceSeries`]
//! into risk and return metrics.
//!
//! - **Returns**: counts, streaks and descriptive statistics of percentage returns
//! - **Regression**: log-return correlation and OLS fit against a benchmark
//! - **Risk**: historical and parametric VaR/CVaR
//! - **Monte Carlo**: simulated price paths and their ending-price summary
//! - **Distribution**: adaptive histogram of returns
//! - **Indicators**: moving average, Bollinger Bands, stochastic, MACD
//! - **Summary**: period and candle statistics
//! - **Ratings**: radar scores
//!
//! Every operation is a function of its inputs; the only randomness is the
//! generator passed to the Monte Carlo simulator. Libraries here emit
//! `tracing` events and never install a subscriber.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use tickstats_analytics::prelude::*;
//! use tickstats_core::PriceSeries;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let closes = [100.0, 102.0, 101.0, 105.0];
//! let series = PriceSeries::from_closes(
//!     "ACME",
//!     closes.iter().enumerate().map(|(i, c)| (start + Duration::days(i as i64), *c)),
//! )
//! .unwrap();
//!
//! let summary = percentage_returns_statistics(&series).unwrap();
//! assert_eq!(summary.number_of_candles, 3);
//! assert_eq!(summary.longest_up_streak, 1);
//! ```
//!
//! [`PriceSeries`]: tickstats_core::PriceSeries

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

// ============================================================================
// MODULES
// ============================================================================

pub mod distribution;
pub mod engine;
pub mod indicators;
pub mod montecarlo;
pub mod ratings;
pub mod regression;
pub mod returns;
pub mod risk;
pub mod summary;

mod serde_nan;

pub use engine::{StatisticsEngine, StatisticsReport};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distribution::{
        DistributionBinner, DistributionBucket, ReturnDistributionTable,
    };
    pub use crate::engine::{StatisticsEngine, StatisticsReport};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::indicators::{
        bollinger_bands, macd, simple_moving_average, stochastic, IndicatorSet,
    };
    pub use crate::montecarlo::{
        MonteCarloPaths, MonteCarloSimulator, MonteCarloSummary, ReturnDistribution,
    };
    pub use crate::ratings::{Fundamentals, RadarRatings};
    pub use crate::regression::{linear_regression, CorrelationMatrix, RegressionResult};
    pub use crate::returns::{
        longest_streak, percentage_returns_statistics, DescriptiveStats, ReturnsSummary,
        StreakDirection,
    };
    pub use crate::risk::{
        var_cvar_from_series, var_cvar_table, ConfidenceLevel, RiskEngine, RiskMetric,
        VarCvarTable, VarMethod,
    };
    pub use crate::summary::{candle_statistics, period_summary, CandleStatistics, PeriodSummary};
}
