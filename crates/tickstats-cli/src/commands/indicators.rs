//! Indicators command implementation.
//!
//! Prints the most recent bars with every chart indicator alongside.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_number, format_optional, print_header, print_json, print_table};

/// Arguments for the indicators command.
#[derive(Args, Debug)]
pub struct IndicatorsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Number of most recent bars to show (0 for all)
    #[arg(short, long, default_value = "10")]
    pub tail: usize,
}

#[derive(Tabled)]
struct IndicatorRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Close")]
    close: String,
    #[tabled(rename = "MA")]
    moving_average: String,
    #[tabled(rename = "BB upper")]
    upper: String,
    #[tabled(rename = "BB lower")]
    lower: String,
    #[tabled(rename = "%K")]
    k: String,
    #[tabled(rename = "%D")]
    d: String,
    #[tabled(rename = "MACD")]
    macd: String,
}

/// Execute the indicators command.
pub fn execute(args: IndicatorsArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;
    let set = session.engine.indicators(&series)?;

    let skip = match args.tail {
        0 => 0,
        tail => series.len().saturating_sub(tail),
    };

    match format {
        OutputFormat::Table => {
            let config = &session.engine.config().indicators;
            print_header(&format!(
                "Indicators: {} (MA {}, BB {}x{}, stochastic {}/{}, MACD {}/{})",
                series.symbol(),
                config.ma_length,
                config.bollinger_length,
                config.bollinger_std_dev,
                config.stochastic_length,
                config.stochastic_slowing,
                config.macd_fast,
                config.macd_slow,
            ));
            let rows: Vec<IndicatorRow> = series
                .bars()
                .iter()
                .enumerate()
                .skip(skip)
                .map(|(i, bar)| IndicatorRow {
                    timestamp: bar.timestamp.to_string(),
                    close: format_number(bar.close, 2),
                    moving_average: format_optional(set.moving_average[i], 2),
                    upper: format_optional(set.bollinger.upper[i], 2),
                    lower: format_optional(set.bollinger.lower[i], 2),
                    k: format_optional(set.stochastic.k[i], 1),
                    d: format_optional(set.stochastic.d[i], 1),
                    macd: format_number(set.macd.macd[i], 3),
                })
                .collect();
            print_table(&rows);
        }
        OutputFormat::Json => print_json(&json!({
            "symbol": series.symbol(),
            "timestamps": series.timestamps(),
            "indicators": set,
        }))?,
    }
    Ok(())
}
