//! Distribution command implementation.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use tickstats_analytics::distribution::ReturnDistributionTable;

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_number, print_header, print_json, print_table, KeyValue};

const BAR_WIDTH: usize = 40;

/// Arguments for the distribution command.
#[derive(Args, Debug)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Return %")]
    value: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "")]
    bar: String,
}

/// Execute the distribution command.
pub fn execute(args: DistributionArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;
    let table = session.engine.distribution(&series)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Return distribution: {}", series.symbol()));
            render(&table);
        }
        OutputFormat::Json => print_json(&table)?,
    }
    Ok(())
}

/// Prints the histogram with a proportional bar per bucket.
pub fn render(table: &ReturnDistributionTable) {
    let decimals = decimals_of(table.bucket_width);
    print_table(&[
        KeyValue::number("Mean return %", table.mean_return, 4),
        KeyValue::new("Bucket width", format_number(table.bucket_width, decimals)),
        KeyValue::new("Returns", table.total().to_string()),
    ]);

    let peak = table.mode().map_or(1, |bucket| bucket.count.max(1));
    let rows: Vec<BucketRow> = table
        .buckets
        .iter()
        .map(|bucket| BucketRow {
            value: format_number(bucket.value, decimals),
            count: bucket.count,
            bar: "█".repeat((bucket.count * BAR_WIDTH).div_ceil(peak)),
        })
        .collect();
    print_table(&rows);
}

fn decimals_of(width: f64) -> usize {
    if width <= 0.0 || !width.is_finite() {
        return 2;
    }
    (-width.log10()).ceil().max(0.0) as usize
}
