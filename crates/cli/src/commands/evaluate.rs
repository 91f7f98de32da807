//! CLI command to evaluate one pair of correlated markets.
//!
//! Reads both order books from JSON files, runs the engine once and prints
//! either a readable report or the serialized opportunity.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use depth_arb_core::AppConfig;
use depth_arb_engine::{ArbitrageEngine, CorrelationType};

use crate::input::load_market;
use crate::report::{print_no_opportunity, print_opportunity};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Order book JSON for the first market
    #[arg(long)]
    pub market1: PathBuf,

    /// Order book JSON for the second market
    #[arg(long)]
    pub market2: PathBuf,

    /// Declared correlation between the markets: same or opposite
    #[arg(long)]
    pub correlation: CorrelationType,

    /// Print the opportunity as JSON (`null` when there is none)
    #[arg(long)]
    pub json: bool,
}

/// Runs a single evaluation.
pub async fn run_evaluate(args: EvaluateArgs, config: &AppConfig) -> Result<()> {
    let market1 = load_market(&args.market1)?;
    let market2 = load_market(&args.market2)?;

    tracing::info!(
        market1 = %market1.id,
        market2 = %market2.id,
        correlation = %args.correlation,
        "Evaluating market pair"
    );

    let engine = ArbitrageEngine::with_config(config.engine.clone());
    let opportunity = engine.calculate_arbitrage(&market1, &market2, args.correlation);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&opportunity)?);
        return Ok(());
    }

    match &opportunity {
        Some(opp) => print_opportunity(opp),
        None => print_no_opportunity(&market1, &market2, args.correlation),
    }

    Ok(())
}
