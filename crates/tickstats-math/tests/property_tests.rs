//! Property-based tests for the numerical kernels.

use approx::assert_relative_eq;
use proptest::prelude::*;
use tickstats_math::prelude::*;

fn has_spread(values: &[f64]) -> bool {
    sample_std(values) > 1e-6
}

proptest! {
    #[test]
    fn prop_correlation_symmetric_and_bounded(
        pairs in prop::collection::vec((-0.2f64..0.2, -0.2f64..0.2), 3..120)
    ) {
        let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        prop_assume!(has_spread(&x) && has_spread(&y));

        let xy = pearson_correlation(&x, &y).unwrap();
        let yx = pearson_correlation(&y, &x).unwrap();
        prop_assert!((-1.0..=1.0).contains(&xy));
        prop_assert!((xy - yx).abs() < 1e-12);
    }

    #[test]
    fn prop_percentile_monotone(
        values in prop::collection::vec(-50.0f64..50.0, 1..100),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let p_lo = percentile(&values, lo).unwrap();
        let p_hi = percentile(&values, hi).unwrap();
        prop_assert!(p_lo <= p_hi + 1e-12);
        prop_assert!(p_lo >= min(&values) - 1e-12);
        prop_assert!(p_hi <= max(&values) + 1e-12);
    }

    #[test]
    fn prop_linear_fit_recovers_line(
        slope in -3.0f64..3.0,
        intercept in -1.0f64..1.0,
        xs in prop::collection::vec(-1.0f64..1.0, 3..60),
    ) {
        prop_assume!(has_spread(&xs));
        let ys: Vec<f64> = xs.iter().map(|x| slope * x + intercept).collect();
        let fit = LinearFit::fit(&xs, &ys).unwrap();
        prop_assert!((fit.slope - slope).abs() < 1e-6);
        prop_assert!((fit.intercept - intercept).abs() < 1e-6);
    }
}

#[test]
fn test_population_std_is_smaller_than_sample_std() {
    let v = [1.0, 3.0, 5.0, 9.0];
    assert!(population_std(&v) < sample_std(&v));
    assert_relative_eq!(
        population_std(&v) * (4.0f64 / 3.0).sqrt(),
        sample_std(&v),
        epsilon = 1e-12
    );
}
