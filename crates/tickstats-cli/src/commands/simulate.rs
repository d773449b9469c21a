//! Simulate command implementation.
//!
//! Monte Carlo forecast of the last close, drawing daily returns from a
//! normal distribution fitted to the series.

use anyhow::Result;
use clap::Args;

use tickstats_analytics::montecarlo::{MonteCarloPaths, MonteCarloSummary};
use tickstats_analytics::StatisticsEngine;

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Number of simulated paths (overrides config)
    #[arg(short = 'n', long)]
    pub simulations: Option<usize>,

    /// Steps per path (overrides config)
    #[arg(long)]
    pub horizon: Option<usize>,

    /// Master seed for reproducible runs (overrides config)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run paths on the rayon thread pool
    #[arg(long)]
    pub parallel: bool,

    /// Include every path in JSON output
    #[arg(long)]
    pub paths: bool,
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;

    let mut config = session.engine.config().clone();
    let simulation = &mut config.simulation;
    if let Some(n) = args.simulations {
        simulation.simulations = n;
    }
    if let Some(horizon) = args.horizon {
        simulation.forecast_period = horizon;
    }
    if args.seed.is_some() {
        simulation.seed = args.seed;
    }
    simulation.parallel |= args.parallel;

    let engine = StatisticsEngine::new(config)?;
    let simulator = engine.simulator(&series)?;
    let paths = engine.simulate(&series)?;
    let summary = paths.summary();

    match format {
        OutputFormat::Table => {
            print_header(&format!("Monte Carlo: {}", series.symbol()));
            print_table(&[
                KeyValue::number("Initial price", simulator.initial_price(), 2),
                KeyValue::percent("Mean daily return", simulator.distribution().mean * 100.0),
                KeyValue::percent("Daily volatility", simulator.distribution().std * 100.0),
                KeyValue::new("Simulations", paths.simulations().to_string()),
                KeyValue::new("Horizon", paths.forecast_period().to_string()),
            ]);
            render(&summary);
        }
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "symbol": series.symbol(),
                "simulator": simulator,
                "summary": summary,
            });
            if args.paths {
                output["paths"] = serde_json::to_value(path_vectors(&paths))?;
            }
            print_json(&output)?;
        }
    }
    Ok(())
}

/// Prints the ending-price summary.
pub fn render(summary: &MonteCarloSummary) {
    print_table(&[
        KeyValue::number("Max ending price", summary.max_ending_price, 2),
        KeyValue::number("Min ending price", summary.min_ending_price, 2),
        KeyValue::number("Average ending price", summary.average_ending_price, 2),
        KeyValue::percent("Paths above initial", summary.perc_above_initial),
        KeyValue::percent("Paths below initial", summary.perc_below_initial),
    ]);
}

fn path_vectors(paths: &MonteCarloPaths) -> Vec<Vec<f64>> {
    (0..paths.simulations())
        .map(|run| paths.path(run).to_vec())
        .collect()
}
