//! Traits for market-data collaborators.
//!
//! The engine never fetches data itself. A [`PriceSource`] supplies a
//! [`PriceSeries`] for a ticker, interval and date range, and the engine
//! computes on whatever it is handed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{Interval, PriceSeries};

/// A request for price history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuery {
    /// Ticker symbol, e.g. `"AAPL"`.
    pub symbol: String,
    /// Bar interval.
    pub interval: Interval,
    /// Inclusive start of the range (`None` = from the first available bar).
    pub start: Option<NaiveDateTime>,
    /// Inclusive end of the range (`None` = up to the last available bar).
    pub end: Option<NaiveDateTime>,
}

impl PriceQuery {
    /// Creates a query for the full available history of `symbol`.
    pub fn new(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            start: None,
            end: None,
        }
    }

    /// Restricts the query to `[start, end]`.
    #[must_use]
    pub fn with_range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Applies the date range to an already loaded series.
    pub fn restrict(&self, series: &PriceSeries) -> PriceSeries {
        let start = self.start.unwrap_or(NaiveDateTime::MIN);
        let end = self.end.unwrap_or(NaiveDateTime::MAX);
        series.between(start, end)
    }
}

/// Source of OHLC price history.
///
/// Implementations return an empty series when the range holds no data;
/// rejecting it is left to the statistics that need bars.
pub trait PriceSource: Send + Sync {
    /// Loads the series described by `query`.
    fn load(&self, query: &PriceQuery) -> CoreResult<PriceSeries>;

    /// Loads `query` and the benchmark over the same interval and range.
    fn load_with_benchmark(
        &self,
        query: &PriceQuery,
        benchmark: &str,
    ) -> CoreResult<(PriceSeries, PriceSeries)> {
        let ticker = self.load(query)?;
        let benchmark_query = PriceQuery {
            symbol: benchmark.to_string(),
            ..query.clone()
        };
        let benchmark = self.load(&benchmark_query)?;
        Ok((ticker, benchmark))
    }
}
