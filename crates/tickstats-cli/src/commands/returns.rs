//! Returns command implementation.
//!
//! Counts, streaks and descriptive statistics of close-to-close percentage
//! returns.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use tickstats_analytics::returns::{DescriptiveStats, ReturnsSummary};

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_number, print_header, print_json, print_table, KeyValue};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Returns")]
    set: &'static str,
    #[tabled(rename = "Average %")]
    average: String,
    #[tabled(rename = "Max %")]
    max: String,
    #[tabled(rename = "Min %")]
    min: String,
}

impl StatsRow {
    fn new(set: &'static str, stats: &DescriptiveStats) -> Self {
        Self {
            set,
            average: format_number(stats.average, 2),
            max: format_number(stats.max, 2),
            min: format_number(stats.min, 2),
        }
    }
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;
    let summary = session.engine.returns(&series)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Returns: {}", series.symbol()));
            render(&summary);
        }
        OutputFormat::Json => print_json(&summary.rounded(2))?,
    }
    Ok(())
}

/// Prints the returns tables.
pub fn render(summary: &ReturnsSummary) {
    print_table(&[
        KeyValue::new("Candles", summary.number_of_candles.to_string()),
        KeyValue::new("Up candles", summary.number_of_up_candles.to_string()),
        KeyValue::new("Down candles", summary.number_of_down_candles.to_string()),
        KeyValue::new("Longest up streak", summary.longest_up_streak.to_string()),
        KeyValue::new("Longest down streak", summary.longest_down_streak.to_string()),
    ]);
    print_table(&[
        StatsRow::new("All", &summary.all),
        StatsRow::new("Up", &summary.up),
        StatsRow::new("Down", &summary.down),
    ]);
}
