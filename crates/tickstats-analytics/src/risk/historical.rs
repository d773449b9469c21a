//! Historical (empirical) VaR and CVaR.

use tickstats_math::stats::{mean, percentile};

use super::ConfidenceLevel;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Lower-tail percentile of `returns` at `1 - level`.
///
/// The 95% VaR is the 5th percentile, interpolated linearly between order
/// statistics. Returned as a fraction; a loss is negative.
pub fn historical_var(returns: &[f64], level: ConfidenceLevel) -> AnalyticsResult<f64> {
    Ok(percentile(returns, level.tail())?)
}

/// Mean of the returns at or below the historical VaR threshold.
pub fn historical_cvar(returns: &[f64], level: ConfidenceLevel) -> AnalyticsResult<f64> {
    let threshold = historical_var(returns, level)?;
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= threshold).collect();
    if tail.is_empty() {
        return Err(AnalyticsError::insufficient_data(
            "no returns at or below the VaR threshold",
        ));
    }
    Ok(mean(&tail))
}
