//! # tickstats Math
//!
//! Numerical kernels for the tickstats statistics engine.
//!
//! This crate provides:
//!
//! - **Descriptive statistics**: mean, sample/population standard deviation,
//!   extremes, linear-interpolated percentiles, Pearson correlation
//! - **Regression**: least-squares polynomial fitting and evaluation
//! - **Linear Algebra**: LU decomposition and linear system solving
//! - **Distributions**: standard normal density, CDF and inverse CDF
//!
//! ## Design Philosophy
//!
//! - **NaN-tolerant descriptive stats**: statistics of an empty sample are
//!   `NaN`, mirroring how dataframe libraries report an empty subset
//! - **Explicit failures for solvers**: fits and correlations that need
//!   data return `MathResult` instead

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod linear_algebra;
pub mod regression;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{norm_cdf, norm_pdf, norm_ppf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::regression::{polyfit, polyval, LinearFit};
    pub use crate::stats::{
        max, mean, min, pearson_correlation, percentile, population_std, round_to, sample_std,
    };
}

pub use error::{MathError, MathResult};
