//! # tickstats Core
//!
//! Core types and abstractions for the tickstats OHLC statistics engine.
//!
//! This crate provides the substrate every statistic is computed from:
//!
//! - **Types**: [`Bar`] (one OHLC observation) and [`PriceSeries`] (an ordered,
//!   validated series of bars for one symbol)
//! - **Derivations**: percentage, simple and log returns; timestamp alignment
//! - **Traits**: [`PriceSource`] for market-data collaborators that supply series
//!
//! ## Example
//!
//! ```rust
//! use tickstats_core::prelude::*;
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let series = PriceSeries::new(
//!     "ACME",
//!     vec![
//!         Bar::from_close(day(2), 100.0),
//!         Bar::from_close(day(3), 102.0),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(series.percentage_returns(), vec![2.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::traits::{PriceQuery, PriceSource};
    pub use crate::types::{Bar, Interval, PriceSeries};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Bar, Interval, PriceSeries};
