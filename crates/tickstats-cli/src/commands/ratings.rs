//! Ratings command implementation.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use tickstats_analytics::ratings::{period_volatility, Fundamentals, RadarRatings};

use crate::cli::OutputFormat;
use crate::commands::{SeriesArgs, Session};
use crate::output::{print_header, print_json, print_table, KeyValue};

/// Arguments for the ratings command.
#[derive(Args, Debug)]
pub struct RatingsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Trailing price/earnings ratio
    #[arg(long)]
    pub pe: Option<f64>,

    /// Debt-to-equity in percent (150 means 1.5x)
    #[arg(long)]
    pub debt_to_equity: Option<f64>,

    /// Trailing annual dividend yield as a fraction (0.025 means 2.5%)
    #[arg(long)]
    pub dividend_yield: Option<f64>,

    /// Forward earnings per share
    #[arg(long)]
    pub forward_eps: Option<f64>,
}

/// Execute the ratings command.
pub fn execute(args: RatingsArgs, session: &Session, format: OutputFormat) -> Result<()> {
    let series = session.load(&args.series)?;
    let fundamentals = Fundamentals {
        trailing_pe: args.pe,
        debt_to_equity: args.debt_to_equity,
        dividend_yield: args.dividend_yield,
        forward_eps: args.forward_eps,
    };
    let ratings = session.engine.ratings(&series, &fundamentals);

    match format {
        OutputFormat::Table => {
            print_header(&format!("Ratings: {}", series.symbol()));
            print_table(&rows(&ratings));
        }
        OutputFormat::Json => print_json(&json!({
            "symbol": series.symbol(),
            "period_volatility": period_volatility(&series),
            "fundamentals": fundamentals,
            "ratings": ratings,
        }))?,
    }
    Ok(())
}

fn rows(ratings: &RadarRatings) -> Vec<KeyValue> {
    ["Value", "Debt", "Stability", "Dividend", "Outlook"]
        .into_iter()
        .zip(ratings.as_array())
        .map(|(name, score)| KeyValue::new(name, stars(score)))
        .collect()
}

fn stars(score: u8) -> String {
    let filled = usize::from(score.min(5));
    format!("{}{} {score}/5", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "★★★☆☆ 3/5");
        assert_eq!(stars(0), "☆☆☆☆☆ 0/5");
    }
}
