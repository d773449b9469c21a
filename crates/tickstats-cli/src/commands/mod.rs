//! CLI command implementations.

pub mod config;
pub mod distribution;
pub mod indicators;
pub mod ratings;
pub mod regression;
pub mod report;
pub mod returns;
pub mod risk;
pub mod simulate;
pub mod summary;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use distribution::DistributionArgs;
pub use indicators::IndicatorsArgs;
pub use ratings::RatingsArgs;
pub use regression::RegressionArgs;
pub use report::ReportArgs;
pub use returns::ReturnsArgs;
pub use risk::RiskArgs;
pub use simulate::SimulateArgs;
pub use summary::SummaryArgs;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;
use tracing::debug;

use tickstats_analytics::StatisticsEngine;
use tickstats_config::EngineConfig;
use tickstats_core::traits::{PriceQuery, PriceSource};
use tickstats_core::{Interval, PriceSeries};
use tickstats_ext_file::create_file_price_source;

use crate::error::{CliError, CliResult};

/// Which series to load.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Ticker symbol, e.g. AAPL
    pub symbol: String,

    /// Bar interval: 1m, 5m, 15m, 30m, 60m, 90m, 1d, 1wk, 1mo, 3mo
    #[arg(short, long, default_value = "1d")]
    pub interval: Interval,

    /// First bar to include (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)
    #[arg(long)]
    pub start: Option<String>,

    /// Last bar to include (YYYY-MM-DD covers the whole day)
    #[arg(long)]
    pub end: Option<String>,
}

impl SeriesArgs {
    /// Builds the price query for these arguments.
    pub fn query(&self) -> CliResult<PriceQuery> {
        let mut query = PriceQuery::new(&self.symbol, self.interval);
        query.start = self
            .start
            .as_deref()
            .map(|s| parse_datetime(s, NaiveTime::MIN))
            .transpose()?;
        query.end = self
            .end
            .as_deref()
            .map(|s| parse_datetime(s, end_of_day()))
            .transpose()?;

        if let (Some(start), Some(end)) = (query.start, query.end) {
            if start > end {
                return Err(CliError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(query)
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Parses a date or date-time; a bare date takes the time `at`.
pub fn parse_datetime(s: &str, at: NaiveTime) -> CliResult<NaiveDateTime> {
    let s = s.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(at))
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Loads the engine configuration, falling back to the standard one.
pub fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading engine configuration");
            EngineConfig::load(path)
                .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
        }
        None => Ok(EngineConfig::standard()),
    }
}

/// Engine and price source shared by the analysis commands.
pub struct Session {
    pub engine: StatisticsEngine,
    source: Arc<dyn PriceSource>,
}

impl Session {
    /// Opens the data directory and builds the configured engine.
    pub fn open(config: Option<&Path>, data_dir: &Path) -> Result<Self> {
        let engine = StatisticsEngine::new(load_config(config)?)?;
        let source = create_file_price_source(data_dir)?;
        Ok(Self { engine, source })
    }

    /// Loads the series described by `args`.
    pub fn load(&self, args: &SeriesArgs) -> Result<PriceSeries> {
        let query = args.query()?;
        let series = self.source.load(&query).map_err(|e| CliError::Data {
            symbol: query.symbol.clone(),
            reason: e.to_string(),
        })?;
        non_empty(series)
    }

    /// Loads `args` and `benchmark` over the same interval and range.
    pub fn load_with_benchmark(
        &self,
        args: &SeriesArgs,
        benchmark: &str,
    ) -> Result<(PriceSeries, PriceSeries)> {
        let query = args.query()?;
        let (ticker, bench) = self
            .source
            .load_with_benchmark(&query, benchmark)
            .map_err(|e| CliError::Data {
                symbol: format!("{} / {benchmark}", query.symbol),
                reason: e.to_string(),
            })?;
        Ok((non_empty(ticker)?, non_empty(bench)?))
    }
}

fn non_empty(series: PriceSeries) -> Result<PriceSeries> {
    if series.is_empty() {
        return Err(CliError::Data {
            symbol: series.symbol().to_string(),
            reason: "no bars in the requested range".to_string(),
        }
        .into());
    }
    debug!(symbol = series.symbol(), bars = series.len(), "loaded series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(start: Option<&str>, end: Option<&str>) -> SeriesArgs {
        SeriesArgs {
            symbol: "ACME".to_string(),
            interval: Interval::Day1,
            start: start.map(String::from),
            end: end.map(String::from),
        }
    }

    #[test]
    fn test_parse_datetime() {
        let ts = parse_datetime("2024-01-02", NaiveTime::MIN).unwrap();
        assert_eq!(ts.to_string(), "2024-01-02 00:00:00");
        let ts = parse_datetime("2024-01-02 15:30:00", NaiveTime::MIN).unwrap();
        assert_eq!(ts.to_string(), "2024-01-02 15:30:00");
        assert!(matches!(
            parse_datetime("01/02/2024", NaiveTime::MIN),
            Err(CliError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_end_date_covers_whole_day() {
        let query = args(Some("2024-01-01"), Some("2024-01-31")).query().unwrap();
        assert_eq!(query.end.unwrap().to_string(), "2024-01-31 23:59:59");
        assert_eq!(query.start.unwrap().to_string(), "2024-01-01 00:00:00");
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            args(Some("2024-02-01"), Some("2024-01-01")).query(),
            Err(CliError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_default_config() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::standard());
    }
}
