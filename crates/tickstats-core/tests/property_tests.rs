//! Property-based tests for price series invariants.
//!
//! - Return derivations have exactly one entry fewer than the series
//! - Alignment yields identical timestamps on both sides
//! - Alignment never invents bars

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use tickstats_core::prelude::*;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Builds a series on the given (deduplicated, sorted) day offsets.
fn series_on(symbol: &str, mut offsets: Vec<i64>, closes: &[f64]) -> PriceSeries {
    offsets.sort_unstable();
    offsets.dedup();
    let bars = offsets
        .iter()
        .zip(closes.iter().cycle())
        .map(|(&offset, &close)| Bar::from_close(base() + Duration::days(offset), close))
        .collect();
    PriceSeries::new(symbol, bars).unwrap()
}

proptest! {
    #[test]
    fn prop_return_lengths(closes in prop::collection::vec(0.01f64..1_000.0, 1..200)) {
        let offsets = (0..closes.len() as i64).collect();
        let series = series_on("ACME", offsets, &closes);

        prop_assert_eq!(series.percentage_returns().len(), series.len() - 1);
        prop_assert_eq!(series.simple_returns().len(), series.len() - 1);
        prop_assert_eq!(series.log_returns().len(), series.len() - 1);
    }

    #[test]
    fn prop_inner_join_aligned(
        left in prop::collection::vec(0i64..120, 0..80),
        right in prop::collection::vec(0i64..120, 0..80),
    ) {
        let a = series_on("ACME", left, &[10.0, 11.0, 12.0]);
        let b = series_on("SPY", right, &[400.0, 401.0]);

        let (a2, b2) = a.inner_join(&b);
        prop_assert!(a2.is_aligned_with(&b2));
        prop_assert!(a2.len() <= a.len().min(b.len()));
        for ts in a2.timestamps() {
            prop_assert!(a.timestamps().contains(&ts));
            prop_assert!(b.timestamps().contains(&ts));
        }
    }
}
