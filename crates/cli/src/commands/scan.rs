//! CLI command to evaluate many market pairs from a single input file.
//!
//! Pairs run on the blocking pool with a bounded number in flight. Results
//! are reported and summarized in input order regardless of completion order.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use depth_arb_core::AppConfig;
use depth_arb_engine::{ArbitrageEngine, ArbitrageOpportunity, CorrelationType, ScanSummary};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;

use crate::input::{ResolvedPair, ScanInput};
use crate::report::{print_no_opportunity, print_opportunity, print_scan_summary};

/// Arguments for the scan command.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Scan input JSON with `markets` and `pairs`
    #[arg(long)]
    pub input: PathBuf,

    /// Maximum pair evaluations in flight (overrides config)
    #[arg(long, env = "DEPTH_ARB_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Print results and summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result for one evaluated pair.
#[derive(Debug, Serialize)]
pub struct PairResult {
    pub market1: String,
    pub market2: String,
    pub correlation: CorrelationType,
    pub opportunity: Option<ArbitrageOpportunity>,
}

#[derive(Debug, Serialize)]
struct ScanReport {
    results: Vec<PairResult>,
    summary: ScanSummary,
}

/// Runs the batch scan.
pub async fn run_scan(args: ScanArgs, config: &AppConfig) -> Result<()> {
    let pairs = ScanInput::load(&args.input)?.resolve()?;
    let concurrency = args
        .concurrency
        .unwrap_or(config.scanner.max_concurrency)
        .max(1);

    tracing::info!(pairs = pairs.len(), concurrency, "Starting scan");

    let engine = Arc::new(ArbitrageEngine::with_config(config.engine.clone()));
    let results = evaluate_pairs(engine, pairs.clone(), concurrency).await;

    let mut summary = ScanSummary::default();
    for result in &results {
        summary.record(result.opportunity.as_ref());
    }

    tracing::info!(
        pairs_scanned = summary.pairs_scanned,
        opportunities = summary.opportunities,
        "Scan finished"
    );

    if args.json {
        let report = ScanReport { results, summary };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (pair, result) in pairs.iter().zip(&results) {
        match &result.opportunity {
            Some(opp) => print_opportunity(opp),
            None => print_no_opportunity(&pair.market1, &pair.market2, pair.correlation),
        }
        println!();
    }
    print_scan_summary(&summary);

    Ok(())
}

/// Evaluates every pair with at most `concurrency` evaluations in flight.
///
/// The returned results are in the same order as `pairs`. A pair whose
/// evaluation task fails is logged and reported without an opportunity.
pub async fn evaluate_pairs(
    engine: Arc<ArbitrageEngine>,
    pairs: Vec<ResolvedPair>,
    concurrency: usize,
) -> Vec<PairResult> {
    let mut indexed: Vec<(usize, PairResult)> = stream::iter(pairs.into_iter().enumerate())
        .map(|(index, pair)| {
            let engine = Arc::clone(&engine);
            async move {
                let market1 = pair.market1.id.clone();
                let market2 = pair.market2.id.clone();
                let correlation = pair.correlation;
                let opportunity = tokio::task::spawn_blocking(move || {
                    engine.calculate_arbitrage(&pair.market1, &pair.market2, pair.correlation)
                })
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        market1 = %market1,
                        market2 = %market2,
                        error = %e,
                        "Pair evaluation failed"
                    );
                    None
                });
                let result = PairResult {
                    market1,
                    market2,
                    correlation,
                    opportunity,
                };
                (index, result)
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depth_arb_core::{MarketOrderBook, OutcomeOrderBook};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn market(id: &str, bid: Decimal, ask: Decimal) -> Arc<MarketOrderBook> {
        Arc::new(MarketOrderBook::new(
            id,
            id.to_uppercase(),
            OutcomeOrderBook::from_tuples(vec![(bid, dec!(1000))], vec![(ask, dec!(1000))]),
            OutcomeOrderBook::default(),
        ))
    }

    fn pair(m1: &Arc<MarketOrderBook>, m2: &Arc<MarketOrderBook>) -> ResolvedPair {
        ResolvedPair {
            market1: Arc::clone(m1),
            market2: Arc::clone(m2),
            correlation: CorrelationType::Same,
        }
    }

    #[tokio::test]
    async fn test_evaluate_pairs_preserves_input_order() {
        let a = market("a", dec!(0.38), dec!(0.40));
        let b = market("b", dec!(0.55), dec!(0.57));
        let c = market("c", dec!(0.30), dec!(0.70));
        let pairs = vec![pair(&a, &b), pair(&c, &a), pair(&b, &a), pair(&c, &c)];

        let results = evaluate_pairs(Arc::new(ArbitrageEngine::new()), pairs, 2).await;

        let ids: Vec<_> = results
            .iter()
            .map(|r| (r.market1.as_str(), r.market2.as_str()))
            .collect();
        assert_eq!(ids, vec![("a", "b"), ("c", "a"), ("b", "a"), ("c", "c")]);

        assert!(results[0].opportunity.is_some());
        assert!(results[1].opportunity.is_none());
        // Buying YES in a and selling in b works from either slot
        assert!(results[2].opportunity.is_some());
        assert!(results[3].opportunity.is_none());
    }

    #[tokio::test]
    async fn test_evaluate_pairs_with_extreme_depth() {
        let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
        let deep = Arc::new(MarketOrderBook::new(
            "deep",
            "DEEP",
            OutcomeOrderBook::from_tuples(vec![], vec![(dec!(0.40), huge), (dec!(0.41), huge)]),
            OutcomeOrderBook::default(),
        ));
        let b = market("b", dec!(0.55), dec!(0.57));
        let c = market("c", dec!(0.30), dec!(0.70));

        let pairs = vec![pair(&deep, &b), pair(&c, &c)];
        let results = evaluate_pairs(Arc::new(ArbitrageEngine::new()), pairs, 2).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].opportunity.is_some());
        assert!(results[1].opportunity.is_none());
    }

    #[tokio::test]
    async fn test_evaluate_pairs_empty() {
        let results = evaluate_pairs(Arc::new(ArbitrageEngine::new()), Vec::new(), 4).await;
        assert!(results.is_empty());
    }
}
