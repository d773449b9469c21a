//! Return histogram for display.
//!
//! The bucket width adapts to the magnitude of the mean return: the more
//! zeros follow the decimal point of `|mean|`, the finer the buckets. A mean
//! with no fractional digits (zero in particular) falls back to a configured
//! width, and no width is ever finer than a configured floor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tickstats_config::BinningConfig;
use tickstats_core::PriceSeries;
use tickstats_math::stats::{mean, round_to};
use tracing::trace;

use crate::error::{AnalyticsError, AnalyticsResult};

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionBucket {
    /// Bucket center: a multiple of the bucket width.
    pub value: f64,
    /// Number of returns rounded to this center.
    pub count: usize,
}

/// Frequency table of rounded returns, sorted by bucket value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistributionTable {
    /// Width of every bucket.
    pub bucket_width: f64,
    /// Mean of the binned returns.
    pub mean_return: f64,
    /// Buckets in ascending order of value.
    pub buckets: Vec<DistributionBucket>,
}

impl ReturnDistributionTable {
    /// Total number of binned returns.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// The most populated bucket (the lowest on ties).
    pub fn mode(&self) -> Option<&DistributionBucket> {
        self.buckets
            .iter()
            .reduce(|best, b| if b.count > best.count { b } else { best })
    }
}

/// Buckets returns into a [`ReturnDistributionTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionBinner {
    fallback_width: f64,
    min_width: f64,
}

impl Default for DistributionBinner {
    fn default() -> Self {
        Self::from_config(&BinningConfig::default())
    }
}

impl DistributionBinner {
    /// Creates a binner from the binning section of the configuration.
    pub fn from_config(config: &BinningConfig) -> Self {
        Self {
            fallback_width: config.fallback_width,
            min_width: config.min_width,
        }
    }

    /// Bucket width for a given mean return.
    ///
    /// With `k` zeros directly after the decimal point of `|mean|` the width
    /// is `5 · 10^-(k+2)`: `0.05` for a mean of `0.3`, `0.0005` for `0.0042`.
    pub fn bucket_width(&self, mean: f64) -> f64 {
        if !mean.is_finite() {
            return self.fallback_width;
        }

        // Display for f64 never uses exponent notation.
        let text = mean.abs().to_string();
        let width = match text.split_once('.') {
            Some((_, fraction)) => {
                let zeros = fraction.chars().take_while(|c| *c == '0').count();
                let exponent = i32::try_from(zeros).unwrap_or(i32::MAX - 2) + 2;
                5.0 * 10f64.powi(-exponent)
            }
            None => self.fallback_width,
        };
        width.max(self.min_width)
    }

    /// Bins `returns`, skipping non-finite values.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InsufficientData` if no finite return remains.
    pub fn bin(&self, returns: &[f64]) -> AnalyticsResult<ReturnDistributionTable> {
        let finite: Vec<f64> = returns.iter().copied().filter(|r| r.is_finite()).collect();
        if finite.is_empty() {
            return Err(AnalyticsError::insufficient_data(
                "distribution needs at least one finite return",
            ));
        }

        let mean_return = mean(&finite);
        let width = self.bucket_width(mean_return);
        let decimals = decimals_of(width);
        trace!(mean_return, width, decimals, "binning returns");

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for r in &finite {
            // Saturating float-to-int cast; only extreme outliers are clamped.
            let index = (r / width).round_ties_even() as i64;
            *counts.entry(index).or_default() += 1;
        }

        let buckets = counts
            .into_iter()
            .map(|(index, count)| DistributionBucket {
                value: round_to(index as f64 * width, decimals),
                count,
            })
            .collect();

        Ok(ReturnDistributionTable {
            bucket_width: width,
            mean_return,
            buckets,
        })
    }

    /// Bins the percentage returns of a price series.
    pub fn bin_series(&self, series: &PriceSeries) -> AnalyticsResult<ReturnDistributionTable> {
        series.require_len(2)?;
        self.bin(&series.percentage_returns())
    }
}

// Decimal places needed to print a multiple of `width` exactly.
fn decimals_of(width: f64) -> u32 {
    let digits = (-width.log10()).ceil();
    if digits <= 0.0 {
        0
    } else {
        digits.min(15.0) as u32
    }
}
