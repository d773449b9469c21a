//! Error types for the tickstats core.
//!
//! Construction of a [`PriceSeries`](crate::PriceSeries) validates its bars
//! eagerly, so malformed market data is rejected before any statistic runs.

use chrono::NaiveDateTime;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A bar carries a non-finite or non-positive price.
    #[error("Invalid bar at {timestamp}: {reason}")]
    InvalidBar {
        /// Timestamp of the offending bar.
        timestamp: NaiveDateTime,
        /// Description of what's invalid.
        reason: String,
    },

    /// Timestamps are not in chronological order.
    #[error("Timestamps out of order: {current} follows {previous}")]
    UnorderedTimestamps {
        /// Timestamp of the earlier bar in the input.
        previous: NaiveDateTime,
        /// Timestamp that should have been later.
        current: NaiveDateTime,
    },

    /// Two bars share the same timestamp.
    #[error("Duplicate timestamp: {timestamp}")]
    DuplicateTimestamp {
        /// The repeated timestamp.
        timestamp: NaiveDateTime,
    },

    /// Not enough bars for the requested derivation.
    #[error("Insufficient data: need at least {required} bars, got {actual}")]
    InsufficientData {
        /// Minimum required bars.
        required: usize,
        /// Actual number of bars.
        actual: usize,
    },

    /// Market data could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Market data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CoreError {
    /// Creates an invalid bar error.
    #[must_use]
    pub fn invalid_bar(timestamp: NaiveDateTime, reason: impl Into<String>) -> Self {
        Self::InvalidBar {
            timestamp,
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
