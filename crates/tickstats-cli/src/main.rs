//! tickstats CLI - Command-line statistics for OHLC price history.
//!
//! # Usage
//!
//! ```bash
//! # Return statistics for daily bars in ./data/AAPL.csv
//! tickstats --data-dir data returns AAPL
//!
//! # Regression against the S&P 500 over 2023
//! tickstats regression AAPL --benchmark ^GSPC --start 2023-01-01 --end 2023-12-31
//!
//! # Reproducible Monte Carlo run as JSON
//! tickstats --format json simulate AAPL --simulations 500 --horizon 60 --seed 7
//!
//! # Everything at once
//! tickstats report AAPL --benchmark ^GSPC
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let format = cli.format;
    let config = cli.config;
    let data_dir = cli.data_dir;

    // Only analysis commands need the data directory and a valid engine config
    let session = || Session::open(config.as_deref(), &data_dir);

    match cli.command {
        Commands::Returns(args) => commands::returns::execute(args, &session()?, format)?,
        Commands::Regression(args) => commands::regression::execute(args, &session()?, format)?,
        Commands::Risk(args) => commands::risk::execute(args, &session()?, format)?,
        Commands::Simulate(args) => commands::simulate::execute(args, &session()?, format)?,
        Commands::Distribution(args) => {
            commands::distribution::execute(args, &session()?, format)?
        }
        Commands::Summary(args) => commands::summary::execute(args, &session()?, format)?,
        Commands::Indicators(args) => commands::indicators::execute(args, &session()?, format)?,
        Commands::Ratings(args) => commands::ratings::execute(args, &session()?, format)?,
        Commands::Report(args) => commands::report::execute(args, &session()?, format)?,
        Commands::Config(args) => commands::config::execute(args, config.as_deref(), format)?,
    }

    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
