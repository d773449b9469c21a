//! Report command implementation.
//!
//! Runs every statistic on one series and prints the combined report.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{distribution, regression, returns, risk, simulate, summary};
use crate::commands::{SeriesArgs, Session};
use crate::output::{print_header, print_json, print_warning};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Benchmark symbol for the regression section
    #[arg(short, long)]
    pub benchmark: Option<String>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let (series, benchmark) = match &args.benchmark {
        Some(symbol) => {
            let (series, bench) = session.load_with_benchmark(&args.series, symbol)?;
            (series, Some(bench))
        }
        None => (session.load(&args.series)?, None),
    };

    let report = session.engine.report(&series, benchmark.as_ref())?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Report: {} ({} bars)", report.symbol, report.bars));
            summary::render(&report.period, &report.candles);

            print_header("Returns");
            returns::render(&report.returns);

            match (&report.regression, &args.benchmark) {
                (Some(result), _) => {
                    print_header("Regression");
                    regression::render(result);
                }
                (None, Some(symbol)) => {
                    print_warning(&format!("regression against {symbol} could not be computed"));
                }
                (None, None) => {}
            }

            print_header("Value at Risk");
            risk::render(&report.risk);

            print_header("Monte Carlo");
            simulate::render(&report.monte_carlo);

            print_header("Return distribution");
            distribution::render(&report.distribution);
        }
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
