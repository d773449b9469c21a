//! A single OHLC observation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One time-bucketed price observation.
///
/// # Example
///
/// ```rust
/// use tickstats_core::Bar;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let bar = Bar::new(ts, 100.0, 104.0, 99.0, 103.0);
/// assert_eq!(bar.typical_price(), (104.0 + 99.0 + 103.0) / 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar's time bucket.
    pub timestamp: NaiveDateTime,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume, when the source provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    /// Creates a bar without volume.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    /// Creates a flat bar where open, high, low and close all equal `close`.
    ///
    /// Handy when only closing prices are known.
    #[must_use]
    pub fn from_close(timestamp: NaiveDateTime, close: f64) -> Self {
        Self::new(timestamp, close, close, close, close)
    }

    /// Sets the traded volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Returns `(high + low + close) / 3`.
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Validates that all prices are finite and the close is positive.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidBar` describing the first violation.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(CoreError::invalid_bar(
                    self.timestamp,
                    format!("{name} is not finite ({value})"),
                ));
            }
        }
        if self.close <= 0.0 {
            return Err(CoreError::invalid_bar(
                self.timestamp,
                format!("close must be positive ({})", self.close),
            ));
        }
        Ok(())
    }
}
