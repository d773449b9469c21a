//! Parametric (normal) VaR and CVaR.

use tickstats_math::distributions::{norm_pdf, norm_ppf};

use super::ConfidenceLevel;
use crate::error::{AnalyticsError, AnalyticsResult};

fn check_moments(mean: f64, std: f64) -> AnalyticsResult<()> {
    if !mean.is_finite() {
        return Err(AnalyticsError::invalid_parameter(format!(
            "mean return must be finite, got {mean}"
        )));
    }
    if !(std.is_finite() && std >= 0.0) {
        return Err(AnalyticsError::invalid_parameter(format!(
            "standard deviation must be finite and non-negative, got {std}"
        )));
    }
    Ok(())
}

/// `mean - z(level) * std`, with `z` the standard normal quantile.
pub fn parametric_var(mean: f64, std: f64, level: ConfidenceLevel) -> AnalyticsResult<f64> {
    check_moments(mean, std)?;
    let z = norm_ppf(level.value())?;
    Ok(mean - z * std)
}

/// `-(mean + std * φ(z(1 - level)) / (1 - level))`.
///
/// The mean enters with the dashboard's sign convention, so for a non-zero
/// mean this differs from the textbook `mean - std * φ(z) / (1 - level)`.
pub fn parametric_cvar(mean: f64, std: f64, level: ConfidenceLevel) -> AnalyticsResult<f64> {
    check_moments(mean, std)?;
    let tail = level.tail();
    let z = norm_ppf(tail)?;
    Ok(-(mean + std * norm_pdf(z) / tail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_var_uses_normal_quantile() {
        let var = parametric_var(0.001, 0.02, ConfidenceLevel::P95).unwrap();
        assert_relative_eq!(var, 0.001 - 1.644_853_626_951_472 * 0.02, epsilon = 1e-10);
    }

    #[test]
    fn test_cvar_expected_shortfall() {
        // φ(z(0.01)) / 0.01 ≈ 2.665214
        let cvar = parametric_cvar(0.0, 0.01, ConfidenceLevel::P99).unwrap();
        assert_relative_eq!(cvar, -0.026_652_142, epsilon = 1e-8);

        let shifted = parametric_cvar(0.002, 0.01, ConfidenceLevel::P99).unwrap();
        assert_relative_eq!(shifted, cvar - 0.002, epsilon = 1e-12);
    }

    #[test]
    fn test_cvar_beyond_var_for_zero_mean() {
        for level in ConfidenceLevel::STANDARD {
            let var = parametric_var(0.0, 0.015, level).unwrap();
            let cvar = parametric_cvar(0.0, 0.015, level).unwrap();
            assert!(cvar < var);
        }
    }

    #[test]
    fn test_rejects_bad_moments() {
        assert!(parametric_var(0.0, -0.1, ConfidenceLevel::P95).is_err());
        assert!(parametric_cvar(f64::NAN, 0.1, ConfidenceLevel::P95).is_err());
    }
}
