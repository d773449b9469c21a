//! Standard normal distribution helpers.
//!
//! Built on the error-function family from `statrs`, which gives full double
//! precision in the tails where VaR quantiles live.

use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::{PI, SQRT_2};

use crate::error::{MathError, MathResult};

/// Standard normal density φ(x).
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution Φ(x).
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse standard normal CDF: the `z` with `Φ(z) = p`.
///
/// # Errors
///
/// Returns `MathError::InvalidInput` unless `0 < p < 1`.
pub fn norm_ppf(p: f64) -> MathResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_input(format!(
            "probability must be in (0, 1), got {p}"
        )));
    }
    Ok(-SQRT_2 * erfc_inv(2.0 * p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_quantiles() {
        assert_relative_eq!(norm_ppf(0.95).unwrap(), 1.644_853_626_951_472, epsilon = 1e-8);
        assert_relative_eq!(norm_ppf(0.99).unwrap(), 2.326_347_874_040_841, epsilon = 1e-8);
        assert_relative_eq!(norm_ppf(0.999).unwrap(), 3.090_232_306_167_813, epsilon = 1e-7);
        assert_relative_eq!(norm_ppf(0.5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry() {
        assert_relative_eq!(
            norm_ppf(0.05).unwrap(),
            -norm_ppf(0.95).unwrap(),
            epsilon = 1e-8
        );
        assert_relative_eq!(norm_pdf(1.3), norm_pdf(-1.3));
    }

    #[test]
    fn test_pdf_peak() {
        assert_relative_eq!(norm_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-12);
    }

    #[test]
    fn test_cdf_inverts_ppf() {
        for p in [0.001, 0.01, 0.05, 0.3, 0.7, 0.99] {
            assert_relative_eq!(norm_cdf(norm_ppf(p).unwrap()), p, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_ppf_domain() {
        assert!(norm_ppf(0.0).is_err());
        assert!(norm_ppf(1.0).is_err());
        assert!(norm_ppf(f64::NAN).is_err());
    }
}
