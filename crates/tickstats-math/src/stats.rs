//! Descriptive statistics over `f64` samples.
//!
//! Moment-style statistics (`mean`, `sample_std`, `min`, ...) return `NaN` for
//! samples too small to define them. Callers that must not proceed on an
//! undefined value use the `MathResult` functions ([`percentile`],
//! [`pearson_correlation`]) or check lengths first.

use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Arithmetic mean, `NaN` for an empty sample.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().mean()
}

/// Unbiased sample variance (ddof = 1), `NaN` for fewer than two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    values.iter().variance()
}

/// Sample standard deviation (ddof = 1), `NaN` for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    values.iter().std_dev()
}

/// Population standard deviation (ddof = 0), `NaN` for an empty sample.
pub fn population_std(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}

/// Largest value, `NaN` for an empty sample.
pub fn max(values: &[f64]) -> f64 {
    Statistics::max(values.iter())
}

/// Smallest value, `NaN` for an empty sample.
pub fn min(values: &[f64]) -> f64 {
    Statistics::min(values.iter())
}

/// Quantile `q` (0..=1) with linear interpolation between closest ranks.
///
/// For sorted values `v` of length `n` the position is `q * (n - 1)`; a
/// fractional position interpolates between its two neighbours (Hyndman-Fan
/// type 7).
///
/// # Errors
///
/// - `MathError::InsufficientData` for an empty sample
/// - `MathError::InvalidInput` if `q` is outside `[0, 1]`
pub fn percentile(values: &[f64], q: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "quantile must be in [0, 1], got {q}"
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Pearson correlation coefficient between two paired samples.
///
/// The result is clamped to `[-1, 1]` to absorb rounding noise.
///
/// # Errors
///
/// - `MathError::LengthMismatch` if the samples differ in length
/// - `MathError::InsufficientData` for fewer than two pairs
/// - `MathError::DivisionByZero` if either sample has zero variance
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> MathResult<f64> {
    MathError::check_paired(x.len(), y.len())?;
    if x.len() < 2 {
        return Err(MathError::insufficient_data(2, x.len()));
    }

    let denom = sample_std(x) * sample_std(y);
    if denom.is_nan() || denom < f64::EPSILON * f64::EPSILON {
        return Err(MathError::DivisionByZero { value: denom });
    }
    let covariance = x.iter().covariance(y.iter());
    Ok((covariance / denom).clamp(-1.0, 1.0))
}

/// Rounds to `decimals` places, half away from zero.
///
/// Negative zero is normalised to `0.0` so a flat result never prints as `-0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&v), 5.0);
        assert_relative_eq!(population_std(&v), 2.0);
        assert_relative_eq!(sample_std(&v), 2.138_089_935_299_395, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_sample_is_nan() {
        assert!(mean(&[]).is_nan());
        assert!(max(&[]).is_nan());
        assert!(min(&[]).is_nan());
        assert!(sample_std(&[1.0]).is_nan());
        assert!(population_std(&[]).is_nan());
    }

    #[test]
    fn test_extremes_and_variance() {
        let v = [3.0, -1.5, 8.25, 0.0];
        assert_eq!(max(&v), 8.25);
        assert_eq!(min(&v), -1.5);
        // mean 2.4375, squared deviations sum 55.546875
        assert_relative_eq!(sample_variance(&v), 18.515_625, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_linear() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(percentile(&v, 0.0).unwrap(), 1.0);
        assert_relative_eq!(percentile(&v, 1.0).unwrap(), 5.0);
        assert_relative_eq!(percentile(&v, 0.5).unwrap(), 3.0);
        // position 0.05 * 4 = 0.2 -> 1 + 0.2 * (2 - 1)
        assert_relative_eq!(percentile(&v, 0.05).unwrap(), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let v = [5.0, -1.0, 3.0];
        assert_relative_eq!(percentile(&v, 0.5).unwrap(), 3.0);
    }

    #[test]
    fn test_percentile_errors() {
        assert!(percentile(&[], 0.5).is_err());
        assert!(percentile(&[1.0], 1.5).is_err());
    }

    #[test]
    fn test_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), 1.0, epsilon = 1e-12);

        let z = [8.0, 6.0, 4.0, 2.0];
        assert_relative_eq!(pearson_correlation(&x, &z).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_degenerate() {
        assert!(matches!(
            pearson_correlation(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(MathError::DivisionByZero { .. })
        ));
        assert!(matches!(
            pearson_correlation(&[1.0], &[1.0, 2.0]),
            Err(MathError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234_5, 2), 1.23);
        assert_eq!(round_to(-2.675_1, 2), -2.68);
        assert_eq!(round_to(-0.001, 2), 0.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
    }
}
