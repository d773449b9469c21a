//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, DistributionArgs, IndicatorsArgs, RatingsArgs, RegressionArgs, ReportArgs,
    ReturnsArgs, RiskArgs, SimulateArgs, SummaryArgs,
};

/// tickstats - Risk and return statistics for OHLC price history
#[derive(Parser)]
#[command(name = "tickstats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Engine configuration file (.toml or .json)
    #[arg(short, long, global = true, env = "TICKSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the price CSV files
    #[arg(
        short,
        long,
        global = true,
        env = "TICKSTATS_DATA_DIR",
        default_value = "data"
    )]
    pub data_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Percentage-return counts, streaks and descriptive statistics
    Returns(ReturnsArgs),

    /// Log-return correlation and linear fit against a benchmark
    Regression(RegressionArgs),

    /// Historical and parametric VaR/CVaR table
    Risk(RiskArgs),

    /// Monte Carlo price paths and their ending-price summary
    Simulate(SimulateArgs),

    /// Histogram of percentage returns
    Distribution(DistributionArgs),

    /// Period and candle overview
    Summary(SummaryArgs),

    /// Moving average, Bollinger Bands, stochastic and MACD
    Indicators(IndicatorsArgs),

    /// Radar ratings from prices and fundamentals
    Ratings(RatingsArgs),

    /// Every statistic in one report
    Report(ReportArgs),

    /// Show, write or check engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
