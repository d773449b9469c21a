//! Config command implementation.
//!
//! Shows, writes and checks engine configuration files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use tickstats_config::EngineConfig;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_success, print_table, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write the standard configuration to a file
    Init(InitArgs),

    /// Check a configuration file
    Validate(ValidateArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (.toml or .json)
    #[arg(default_value = "tickstats.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check; defaults to --config
    pub path: Option<PathBuf>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(config, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
        ConfigCommand::Validate(validate_args) => {
            let path = validate_args.path.as_deref().or(config).ok_or_else(|| {
                CliError::Config("no file given; pass a path or --config".to_string())
            })?;
            execute_validate(path)
        }
    }
}

/// Show the effective configuration.
fn execute_show(config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let engine_config = load_config(config)?;

    match format {
        OutputFormat::Table => {
            let source = config.map_or_else(|| "built-in".to_string(), |p| p.display().to_string());
            print_header(&format!("Configuration: {} ({source})", engine_config.name));
            print_table(&rows(&engine_config));
        }
        OutputFormat::Json => print_json(&engine_config)?,
    }
    Ok(())
}

/// Write the standard configuration.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::Config(format!(
            "{} already exists; use --force to overwrite",
            args.path.display()
        ))
        .into());
    }
    EngineConfig::standard()
        .save(&args.path)
        .map_err(|e| CliError::Config(format!("{}: {e}", args.path.display())))?;
    print_success(&format!("Wrote {}", args.path.display()));
    Ok(())
}

/// Check a configuration file.
fn execute_validate(path: &Path) -> Result<()> {
    let config = load_config(Some(path))?;
    print_success(&format!("{} is valid ({})", path.display(), config.name));
    Ok(())
}

fn rows(config: &EngineConfig) -> Vec<KeyValue> {
    let levels: Vec<String> = config
        .risk
        .confidence_levels
        .iter()
        .map(ToString::to_string)
        .collect();
    let seed = config
        .simulation
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());

    vec![
        KeyValue::new("risk.confidence_levels", levels.join(", ")),
        KeyValue::new(
            "risk.min_reliable_observations",
            config.risk.min_reliable_observations.to_string(),
        ),
        KeyValue::new("risk.precision", config.risk.precision.to_string()),
        KeyValue::new("simulation.simulations", config.simulation.simulations.to_string()),
        KeyValue::new(
            "simulation.forecast_period",
            config.simulation.forecast_period.to_string(),
        ),
        KeyValue::new("simulation.seed", seed),
        KeyValue::new("simulation.parallel", config.simulation.parallel.to_string()),
        KeyValue::new("binning.fallback_width", config.binning.fallback_width.to_string()),
        KeyValue::new("binning.min_width", config.binning.min_width.to_string()),
        KeyValue::new("indicators.ma_length", config.indicators.ma_length.to_string()),
        KeyValue::new(
            "indicators.bollinger",
            format!(
                "{} x {}",
                config.indicators.bollinger_length, config.indicators.bollinger_std_dev
            ),
        ),
        KeyValue::new(
            "indicators.stochastic",
            format!(
                "{} / {}",
                config.indicators.stochastic_length, config.indicators.stochastic_slowing
            ),
        ),
        KeyValue::new(
            "indicators.macd",
            format!("{} / {}", config.indicators.macd_fast, config.indicators.macd_slow),
        ),
    ]
}
