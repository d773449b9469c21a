//! # tickstats Ext File
//!
//! File-based market data for the tickstats engine.
//!
//! Price history is read from CSV files laid out as market-data downloads
//! produce them, one file per symbol and interval, and served through the
//! [`PriceSource`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_source;

pub use csv_source::*;

use std::path::Path;
use std::sync::Arc;

use tickstats_core::traits::PriceSource;
use tickstats_core::{CoreError, CoreResult};

/// Create a file-based price source rooted at `data_dir`.
///
/// # Errors
///
/// Returns `CoreError::Io` if `data_dir` is not a directory.
pub fn create_file_price_source(data_dir: impl AsRef<Path>) -> CoreResult<Arc<dyn PriceSource>> {
    let data_dir = data_dir.as_ref();
    if !data_dir.is_dir() {
        return Err(CoreError::Io(format!(
            "data directory {} does not exist",
            data_dir.display()
        )));
    }
    Ok(Arc::new(CsvPriceSource::new(data_dir)))
}
