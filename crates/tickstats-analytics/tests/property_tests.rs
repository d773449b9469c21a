//! Property-based tests for the statistics engine.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;
use tickstats_analytics::prelude::*;
use tickstats_core::PriceSeries;

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    PriceSeries::from_closes(
        "PROP",
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| (start + Duration::days(i as i64), *c)),
    )
    .unwrap()
}

fn closes_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..500.0, 2..120)
}

proptest! {
    #[test]
    fn prop_candle_count_is_bars_minus_one(closes in closes_strategy()) {
        let series = series_from_closes(&closes);
        let summary = percentage_returns_statistics(&series).unwrap();
        prop_assert_eq!(summary.number_of_candles, closes.len() - 1);
        prop_assert!(summary.longest_up_streak <= summary.number_of_up_candles);
        prop_assert!(summary.longest_down_streak <= summary.number_of_down_candles);
    }

    #[test]
    fn prop_positive_returns_have_no_down_streak(
        returns in prop::collection::vec(0.001f64..10.0, 1..80)
    ) {
        prop_assert_eq!(longest_streak(&returns, StreakDirection::Down), 0);
        prop_assert_eq!(longest_streak(&returns, StreakDirection::Up), returns.len());
    }

    #[test]
    fn prop_var_ordering(
        returns in prop::collection::vec(-0.1f64..0.1, 5..300)
    ) {
        prop_assume!(tickstats_math::stats::sample_std(&returns) > 1e-6);
        let table = var_cvar_table(&returns, &ConfidenceLevel::STANDARD).unwrap();
        for method in VarMethod::ALL {
            let var = |level| table.get(method, RiskMetric::VaR, level).unwrap();
            prop_assert!(var(ConfidenceLevel::P95) >= var(ConfidenceLevel::P99));
            prop_assert!(var(ConfidenceLevel::P99) >= var(ConfidenceLevel::P999));
        }
        for level in ConfidenceLevel::STANDARD {
            let var = table.get(VarMethod::Historical, RiskMetric::VaR, level).unwrap();
            let cvar = table.get(VarMethod::Historical, RiskMetric::CVaR, level).unwrap();
            prop_assert!(cvar <= var);
        }
    }

    #[test]
    fn prop_simulation_shape_and_summary(
        n in 1usize..40,
        t in 1usize..40,
        mean in -0.01f64..0.01,
        std in 0.0f64..0.05,
        seed in any::<u64>(),
    ) {
        let dist = ReturnDistribution::new(mean, std).unwrap();
        let sim = MonteCarloSimulator::new(dist, 100.0, n, t).unwrap();
        let paths = sim.simulate(&mut StdRng::seed_from_u64(seed));

        prop_assert_eq!(paths.prices().dim(), (t, n));
        prop_assert!(paths.prices().iter().all(|p| p.is_finite() && *p > 0.0));

        let summary = paths.summary();
        prop_assert!((0.0..=100.0).contains(&summary.perc_above_initial));
        prop_assert_eq!(summary.perc_above_initial + summary.perc_below_initial, 100.0);
    }

    #[test]
    fn prop_parallel_matches_itself(n in 1usize..20, t in 1usize..20, seed in any::<u64>()) {
        let dist = ReturnDistribution::new(0.0, 0.02).unwrap();
        let sim = MonteCarloSimulator::new(dist, 10.0, n, t).unwrap();
        prop_assert_eq!(sim.simulate_parallel(seed), sim.simulate_parallel(seed));
    }

    #[test]
    fn prop_parallel_independent_of_thread_count(
        n in 1usize..24,
        t in 1usize..12,
        seed in any::<u64>(),
    ) {
        let dist = ReturnDistribution::new(0.0005, 0.015).unwrap();
        let sim = MonteCarloSimulator::new(dist, 25.0, n, t).unwrap();

        let single = ThreadPoolBuilder::new().num_threads(1).build().unwrap();
        let many = ThreadPoolBuilder::new().num_threads(4).build().unwrap();
        let on_one = single.install(|| sim.simulate_parallel(seed));
        let on_four = many.install(|| sim.simulate_parallel(seed));

        prop_assert_eq!(&on_one, &on_four);
        prop_assert_eq!(on_one, sim.simulate_parallel(seed));
    }

    #[test]
    fn prop_distribution_preserves_count(
        returns in prop::collection::vec(-20.0f64..20.0, 1..200)
    ) {
        let table = DistributionBinner::default().bin(&returns).unwrap();
        prop_assert_eq!(table.total(), returns.len());
        prop_assert!(table.buckets.windows(2).all(|w| w[0].value < w[1].value));
    }
}
