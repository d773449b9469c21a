//! Error types for the statistics engine.

use thiserror::Error;
use tickstats_config::ConfigError;
use tickstats_core::CoreError;
use tickstats_math::MathError;

/// Unified error type for all analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Input series too short, empty, or misaligned for the computation.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Caller-supplied parameter outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed price data.
    #[error("price data error: {0}")]
    Core(CoreError),

    /// Numerical failure (singular fit, zero variance in a correlation, ...).
    #[error("math error: {0}")]
    Math(MathError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData(message.into())
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Returns true for errors caused by too little or misaligned data.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientData { .. } => Self::InsufficientData(err.to_string()),
            other => Self::Core(other),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { .. } | MathError::LengthMismatch { .. } => {
                Self::InsufficientData(err.to_string())
            }
            other => Self::Math(other),
        }
    }
}

impl From<ConfigError> for AnalyticsError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_data_maps_to_insufficient() {
        let err: AnalyticsError = CoreError::insufficient_data(2, 0).into();
        assert!(err.is_insufficient_data());

        let err: AnalyticsError = MathError::LengthMismatch { left: 1, right: 2 }.into();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_numeric_failure_stays_math() {
        let err: AnalyticsError = MathError::SingularMatrix.into();
        assert!(matches!(err, AnalyticsError::Math(MathError::SingularMatrix)));
        assert_eq!(err.to_string(), "math error: matrix is singular");
    }
}
