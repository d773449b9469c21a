//! Errors raised by the numeric kernels.

use thiserror::Error;

/// Result alias used across `tickstats-math`.
pub type MathResult<T> = Result<T, MathError>;

/// Failure modes of the statistics, regression and linear algebra routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A denominator such as a variance or a first price was (close to) zero.
    #[error("denominator too close to zero ({value:.2e})")]
    DivisionByZero {
        /// Offending denominator.
        value: f64,
    },

    /// No usable pivot while factoring a system.
    #[error("matrix is singular")]
    SingularMatrix,

    /// Operand shapes do not line up.
    #[error("shape mismatch: {rows1}x{cols1} against {rows2}x{cols2}")]
    DimensionMismatch {
        /// Rows of the left operand.
        rows1: usize,
        /// Columns of the left operand.
        cols1: usize,
        /// Rows of the right operand.
        rows2: usize,
        /// Columns of the right operand.
        cols2: usize,
    },

    /// Paired samples (x/y, asset/benchmark) differ in length.
    #[error("paired samples differ in length ({left} vs {right})")]
    LengthMismatch {
        /// Length of the first sample.
        left: usize,
        /// Length of the second sample.
        right: usize,
    },

    /// Too few observations for the estimator.
    #[error("need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum count.
        required: usize,
        /// Count supplied.
        actual: usize,
    },

    /// A parameter outside its domain.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },
}

impl MathError {
    /// Shorthand for [`MathError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`MathError::InsufficientData`].
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Errors unless the two samples pair up.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::LengthMismatch`] when the lengths differ.
    pub fn check_paired(left: usize, right: usize) -> MathResult<()> {
        if left == right {
            Ok(())
        } else {
            Err(Self::LengthMismatch { left, right })
        }
    }
}
