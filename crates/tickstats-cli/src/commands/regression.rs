//! Regression command implementation.
//!
//! Correlates the ticker's daily log returns with a benchmark's and fits a
//! straight line through them.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use tickstats_analytics::regression::RegressionResult;

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_number, print_header, print_json, print_table, KeyValue};

/// Default benchmark: the S&P 500 index.
pub const DEFAULT_BENCHMARK: &str = "^GSPC";

/// Arguments for the regression command.
#[derive(Args, Debug)]
pub struct RegressionArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Benchmark symbol
    #[arg(short, long, default_value = DEFAULT_BENCHMARK)]
    pub benchmark: String,

    /// List every aligned observation
    #[arg(long)]
    pub points: bool,
}

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Benchmark")]
    benchmark: String,
    #[tabled(rename = "Trend")]
    trend: String,
}

/// Execute the regression command.
pub fn execute(args: RegressionArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let (ticker, benchmark) = session.load_with_benchmark(&args.series, &args.benchmark)?;
    let result = session.engine.regression(&ticker, &benchmark)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Regression: {} vs {}", result.ticker, result.benchmark));
            render(&result);
            if args.points {
                print_points(&result);
            }
        }
        OutputFormat::Json if args.points => print_json(&result)?,
        OutputFormat::Json => print_json(&serde_json::json!({
            "ticker": result.ticker,
            "benchmark": result.benchmark,
            "observations": result.observations(),
            "correlation": result.correlation,
            "slope": result.slope,
            "intercept": result.intercept,
        }))?,
    }
    Ok(())
}

/// Prints the fit overview.
pub fn render(result: &RegressionResult) {
    print_table(&[
        KeyValue::new("Benchmark", result.benchmark.as_str()),
        KeyValue::new("Observations", result.observations().to_string()),
        KeyValue::number("Correlation", result.correlation.coefficient(), 4),
        KeyValue::number("Slope", result.slope, 4),
        KeyValue::number("Intercept", result.intercept, 6),
    ]);
}

fn print_points(result: &RegressionResult) {
    let rows: Vec<PointRow> = result
        .timestamps
        .iter()
        .zip(&result.ticker_returns)
        .zip(&result.benchmark_returns)
        .zip(&result.trend)
        .map(|(((ts, t), b), trend)| PointRow {
            timestamp: ts.to_string(),
            ticker: format_number(*t, 6),
            benchmark: format_number(*b, 6),
            trend: format_number(*trend, 6),
        })
        .collect();
    print_header("Observations");
    print_table(&rows);
}
