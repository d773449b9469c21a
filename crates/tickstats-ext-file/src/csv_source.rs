//! CSV price files.
//!
//! The expected layout is the one market-data downloads produce: a `Date`
//! (daily and longer) or `Datetime` (intraday) column followed by `Open`,
//! `High`, `Low`, `Close` and optionally `Adj Close` and `Volume`. Headers
//! may also be lower-case; other columns are ignored.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use tickstats_core::traits::{PriceQuery, PriceSource};
use tickstats_core::{Bar, CoreError, CoreResult, PriceSeries};

// =============================================================================
// CSV PARSING
// =============================================================================

/// CSV record for one bar.
#[derive(Debug, Deserialize)]
struct BarRecord {
    #[serde(alias = "Date", alias = "Datetime", alias = "date", alias = "datetime")]
    timestamp: String,
    #[serde(alias = "Open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(alias = "High", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(alias = "Low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(alias = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(alias = "Volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

impl BarRecord {
    fn into_bar(self) -> CoreResult<Option<Bar>> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        let (Some(open), Some(high), Some(low), Some(close)) =
            (self.open, self.high, self.low, self.close)
        else {
            return Ok(None);
        };

        let bar = Bar::new(timestamp, open, high, low, close);
        Ok(Some(match self.volume {
            Some(volume) => bar.with_volume(volume),
            None => bar,
        }))
    }
}

/// Parses a date or date-time cell.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated ISO form,
/// and any of those with a UTC offset, which is dropped in favour of the
/// exchange-local wall time.
pub fn parse_timestamp(text: &str) -> CoreResult<NaiveDateTime> {
    let text = text.trim();

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(ts);
        }
    }
    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"] {
        if let Ok(ts) = DateTime::parse_from_str(text, format) {
            return Ok(ts.naive_local());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }

    Err(CoreError::Parse(format!("unrecognised timestamp '{text}'")))
}

/// Reads a price series from CSV data.
///
/// Rows with a missing price are skipped. Rows are sorted chronologically;
/// duplicate timestamps are rejected.
pub fn read_price_csv(reader: impl Read, symbol: &str) -> CoreResult<PriceSeries> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut bars = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in csv_reader.deserialize::<BarRecord>().enumerate() {
        let record = result.map_err(|e| CoreError::Parse(format!("{symbol} row {}: {e}", row + 1)))?;
        match record.into_bar()? {
            Some(bar) => bars.push(bar),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(symbol, skipped, "skipped rows with missing prices");
    }

    if !bars.windows(2).all(|w| w[0].timestamp <= w[1].timestamp) {
        debug!(symbol, "sorting rows chronologically");
        bars.sort_by_key(|bar| bar.timestamp);
    }

    PriceSeries::new(symbol, bars)
}

/// Reads a price series from a CSV file.
pub fn read_price_file(path: impl AsRef<Path>, symbol: &str) -> CoreResult<PriceSeries> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| CoreError::Io(format!("{}: {e}", path.display())))?;
    read_price_csv(file, symbol)
}

// =============================================================================
// DIRECTORY SOURCE
// =============================================================================

/// Price source backed by a directory of CSV files.
///
/// For a query on `SYMBOL` at interval `1d` the files tried are
/// `<root>/SYMBOL/1d.csv` and then `<root>/SYMBOL.csv`. Parsed files are
/// cached until [`CsvPriceSource::reload`].
pub struct CsvPriceSource {
    root: PathBuf,
    cache: DashMap<PathBuf, PriceSeries>,
}

impl CsvPriceSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: DashMap::new(),
        }
    }

    /// Directory the source reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Forget every cached series.
    pub fn reload(&self) {
        self.cache.clear();
    }

    /// Path of the file that serves `query`.
    pub fn resolve(&self, query: &PriceQuery) -> CoreResult<PathBuf> {
        let candidates = [
            self.root
                .join(&query.symbol)
                .join(format!("{}.csv", query.interval.code())),
            self.root.join(format!("{}.csv", query.symbol)),
        ];
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| {
                CoreError::Io(format!(
                    "no price file for {} at {} under {}",
                    query.symbol,
                    query.interval,
                    self.root.display()
                ))
            })
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self, query: &PriceQuery) -> CoreResult<PriceSeries> {
        let path = self.resolve(query)?;

        let full = match self.cache.get(&path) {
            Some(cached) => cached.clone(),
            None => {
                debug!(symbol = %query.symbol, path = %path.display(), "reading price file");
                let series = read_price_file(&path, &query.symbol)?.with_interval(query.interval);
                self.cache.insert(path, series.clone());
                series
            }
        };

        Ok(query.restrict(&full))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickstats_core::Interval;

    const DAILY: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,100.0,101.5,99.0,101.0,100.8,120000
2024-01-03,101.0,103.0,100.5,102.5,102.3,98000
2024-01-04,102.5,102.9,100.1,100.4,100.2,143000
";

    #[test]
    fn test_parse_timestamp_forms() {
        let midnight = parse_timestamp("2024-01-02").unwrap();
        assert_eq!(midnight.to_string(), "2024-01-02 00:00:00");

        let intraday = parse_timestamp("2024-01-02 09:30:00").unwrap();
        assert_eq!(intraday.to_string(), "2024-01-02 09:30:00");

        let offset = parse_timestamp("2024-01-02 09:30:00-05:00").unwrap();
        assert_eq!(offset, intraday);

        assert_eq!(parse_timestamp("2024-01-02T09:30:00").unwrap(), intraday);
        assert!(parse_timestamp("02/01/2024").is_err());
    }

    #[test]
    fn test_read_daily_csv() {
        let series = read_price_csv(DAILY.as_bytes(), "ACME").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.symbol(), "ACME");
        assert_eq!(series.bars()[1].high, 103.0);
        assert_eq!(series.bars()[2].volume, Some(143_000.0));
        assert_eq!(series.last_close(), Some(100.4));
    }

    #[test]
    fn test_missing_prices_are_skipped() {
        let data = "\
Datetime,Open,High,Low,Close
2024-01-02 09:30:00,10,11,9,10.5
2024-01-02 09:31:00,,,,
2024-01-02 09:32:00,10.5,10.8,10.2,10.6
";
        let series = read_price_csv(data.as_bytes(), "X").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.bars()[0].volume, None);
    }

    #[test]
    fn test_unsorted_rows_are_sorted() {
        let data = "\
Date,Open,High,Low,Close
2024-01-03,2,2,2,2
2024-01-02,1,1,1,1
";
        let series = read_price_csv(data.as_bytes(), "X").unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_duplicate_rows_rejected() {
        let data = "\
Date,Open,High,Low,Close
2024-01-02,1,1,1,1
2024-01-02,1,1,1,1
";
        assert!(matches!(
            read_price_csv(data.as_bytes(), "X"),
            Err(CoreError::DuplicateTimestamp { .. })
        ));
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let data = "Date,Open,High,Low,Close\nyesterday,1,1,1,1\n";
        assert!(matches!(
            read_price_csv(data.as_bytes(), "X"),
            Err(CoreError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let source = CsvPriceSource::new("/definitely/not/here");
        let query = PriceQuery::new("ACME", Interval::Day1);
        assert!(matches!(source.load(&query), Err(CoreError::Io(_))));
    }
}
