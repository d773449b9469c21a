//! Risk command implementation.
//!
//! Historical and parametric VaR/CVaR at each confidence level.

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use tickstats_analytics::risk::{RiskEngine, RiskMetric, VarCvarTable, VarMethod};

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{format_percent, print_header, print_json, print_table, print_warning};

/// Arguments for the risk command.
#[derive(Args, Debug)]
pub struct RiskArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Confidence level as a fraction; repeat for several (overrides config)
    #[arg(short, long = "level")]
    pub levels: Vec<f64>,
}

#[derive(Tabled)]
struct RiskRow {
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Hist. VaR")]
    historical_var: String,
    #[tabled(rename = "Hist. CVaR")]
    historical_cvar: String,
    #[tabled(rename = "Param. VaR")]
    parametric_var: String,
    #[tabled(rename = "Param. CVaR")]
    parametric_cvar: String,
}

/// Execute the risk command.
pub fn execute(args: RiskArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;

    let table = if args.levels.is_empty() {
        session.engine.risk(&series)?
    } else {
        let mut risk = session.engine.config().risk.clone();
        risk.confidence_levels = args.levels;
        RiskEngine::from_config(&risk)?.compute_for_series(&series)?
    };

    match format {
        OutputFormat::Table => {
            print_header(&format!("Value at Risk: {}", series.symbol()));
            render(&table);
        }
        OutputFormat::Json => print_json(&table)?,
    }
    Ok(())
}

/// Prints the VaR/CVaR table, one row per confidence level.
pub fn render(table: &VarCvarTable) {
    let cell = |method, metric, level| {
        table
            .get(method, metric, level)
            .map_or_else(String::new, format_percent)
    };

    let rows: Vec<RiskRow> = table
        .levels()
        .into_iter()
        .map(|level| RiskRow {
            confidence: level.to_string(),
            historical_var: cell(VarMethod::Historical, RiskMetric::VaR, level),
            historical_cvar: cell(VarMethod::Historical, RiskMetric::CVaR, level),
            parametric_var: cell(VarMethod::Parametric, RiskMetric::VaR, level),
            parametric_cvar: cell(VarMethod::Parametric, RiskMetric::CVaR, level),
        })
        .collect();
    print_table(&rows);

    if !table.reliable {
        print_warning(&format!(
            "only {} observations; tail estimates are unreliable",
            table.observations
        ));
    }
}
