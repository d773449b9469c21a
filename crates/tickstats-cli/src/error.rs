//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS.")]
    InvalidDate(String),

    /// Start of the range falls after its end.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start.
        start: String,
        /// Requested end.
        end: String,
    },

    /// Market data could not be loaded.
    #[error("Could not load {symbol}: {reason}")]
    Data {
        /// Symbol requested.
        symbol: String,
        /// Underlying failure.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
