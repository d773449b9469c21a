//! Summary command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tabled::Tabled;

use tickstats_analytics::returns::DescriptiveStats;
use tickstats_analytics::summary::{
    candle_statistics, period_summary, CandleStatistics, PeriodSummary,
};

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_number, print_header, print_json, print_table, KeyValue};

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Tabled)]
struct CandleRow {
    #[tabled(rename = "Per bar")]
    name: &'static str,
    #[tabled(rename = "Average %")]
    average: String,
    #[tabled(rename = "Max %")]
    max: String,
    #[tabled(rename = "Min %")]
    min: String,
}

impl CandleRow {
    fn new(name: &'static str, stats: &DescriptiveStats) -> Self {
        Self {
            name,
            average: format_number(stats.average, 2),
            max: format_number(stats.max, 2),
            min: format_number(stats.min, 2),
        }
    }
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;
    let period = period_summary(&series)?;
    let candles = candle_statistics(&series)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Summary: {}", series.symbol()));
            render(&period, &candles);
        }
        OutputFormat::Json => print_json(&json!({
            "symbol": series.symbol(),
            "bars": series.len(),
            "period": period,
            "candles": candles,
        }))?,
    }
    Ok(())
}

/// Prints the period overview and the candle table.
pub fn render(period: &PeriodSummary, candles: &CandleStatistics) {
    print_table(&[
        KeyValue::new("Direction", period.direction.to_string()),
        KeyValue::percent("Period change", period.period_change),
        KeyValue::number("Period max", period.period_max, 2),
        KeyValue::number("Period min", period.period_min, 2),
        KeyValue::percent("Max gain", period.max_gain),
        KeyValue::percent("Max drop", period.max_drop),
        KeyValue::separator(),
        KeyValue::number("Lowest low", candles.lowest_low, 2),
        KeyValue::number("Highest high", candles.highest_high, 2),
        KeyValue::number("Price range", candles.price_range, 2),
        KeyValue::percent("Range", candles.range_percent),
        KeyValue::percent("Open to close", candles.open_to_close_change),
    ]);
    print_table(&[
        CandleRow::new("Body", &candles.body),
        CandleRow::new("Range", &candles.range),
        CandleRow::new("Gap", &candles.gap),
    ]);
}
