//! Execution-aware arbitrage evaluation for a pair of correlated markets.
//!
//! [`ArbitrageEngine::calculate_arbitrage`] enumerates the legs allowed by the
//! declared correlation, picks the most profitable one at the small reference
//! size, searches for the largest profitable size, samples the profit curve
//! and attaches risk metrics.

use chrono::Utc;
use depth_arb_core::{EngineConfig, MarketOrderBook};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::risk::{confidence_score, slippage_risk_pct};
use crate::sizing::{find_max_size, profit_curve};
use crate::strategy::{enumerate, select_best, CandidateStrategy};
use crate::types::{ArbitrageOpportunity, CorrelationType, ExecutionStrategy, MarketPriceRanges};

// =============================================================================
// Engine
// =============================================================================

/// Evaluates two market snapshots for an executable arbitrage.
///
/// Holds only its sizing configuration; every call works on its own copies of
/// the input, so one engine can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageEngine {
    config: EngineConfig,
}

impl ArbitrageEngine {
    /// Creates an engine with the default sizing constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom sizing.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Finds the best liquidity-bounded trade between two correlated markets.
    ///
    /// Returns `None` when no leg clears the top-of-book filter, when no leg is
    /// profitable at the small reference size, or when a needed book side is
    /// empty.
    #[must_use]
    pub fn calculate_arbitrage(
        &self,
        market1: &MarketOrderBook,
        market2: &MarketOrderBook,
        correlation: CorrelationType,
    ) -> Option<ArbitrageOpportunity> {
        trace!(
            market1 = %market1.id,
            market2 = %market2.id,
            correlation = %correlation,
            "Evaluating market pair"
        );

        let ranges1 = MarketPriceRanges::from_market(market1);
        let ranges2 = MarketPriceRanges::from_market(market2);

        let candidates = enumerate(&ranges1, &ranges2, correlation, &self.config);
        let candidate_count = candidates.len();
        let Some(best) = select_best(candidates) else {
            debug!(
                market1 = %market1.id,
                market2 = %market2.id,
                candidates = candidate_count,
                "No profitable leg at reference size"
            );
            return None;
        };

        let opportunity = self.build_opportunity(&best, &ranges1, &ranges2, correlation);

        info!(
            market1 = %market1.id,
            market2 = %market2.id,
            correlation = %correlation,
            strategy = %opportunity.strategy.description,
            profit_small = %opportunity.profit_at_small.profit,
            profit_large = %opportunity.profit_at_large.profit,
            max_shares = opportunity.max_profitable_shares,
            slippage_risk_pct = %opportunity.slippage_risk_pct,
            confidence = opportunity.confidence,
            "Arbitrage opportunity detected"
        );

        Some(opportunity)
    }

    fn build_opportunity(
        &self,
        best: &CandidateStrategy<'_>,
        ranges1: &MarketPriceRanges,
        ranges2: &MarketPriceRanges,
        correlation: CorrelationType,
    ) -> ArbitrageOpportunity {
        let buy_asks = &best.buy_range.asks;
        let sell_bids = &best.sell_range.bids;

        let max_profitable_shares = find_max_size(buy_asks, sell_bids, self.config.max_search_size);
        let profit_curve = profit_curve(
            buy_asks,
            sell_bids,
            max_profitable_shares,
            self.config.curve_samples,
            &self.config.curve_checkpoints,
        );

        let slippage_risk_pct = slippage_risk_pct(buy_asks, sell_bids);
        let confidence = confidence_score(
            max_profitable_shares,
            best.profit_at_small.profit,
            ranges1.yes_level_count(),
            ranges2.yes_level_count(),
        );

        let strategy = ExecutionStrategy {
            buy_slot: best.leg.buy_market,
            buy_market_id: best.buy_market.market_id.clone(),
            buy_market_label: best.buy_market.label.clone(),
            buy_outcome: best.leg.buy_outcome,
            buy_best_ask: best.buy_best_ask,
            sell_market_id: best.sell_market.market_id.clone(),
            sell_market_label: best.sell_market.label.clone(),
            sell_outcome: best.leg.sell_outcome,
            sell_best_bid: best.sell_best_bid,
            description: best.describe(),
        };

        ArbitrageOpportunity {
            market1: ranges1.clone(),
            market2: ranges2.clone(),
            correlation,
            strategy,
            profit_curve,
            profit_at_small: best.profit_at_small,
            profit_at_large: best.profit_at_large,
            max_profitable_shares,
            slippage_risk_pct,
            confidence,
            detected_at: Utc::now(),
        }
    }
}

// =============================================================================
// Scan Summary
// =============================================================================

/// Summary of evaluations across many market pairs, for monitoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total pairs evaluated.
    pub pairs_scanned: u32,
    /// Pairs that produced an opportunity.
    pub opportunities: u32,
    /// Best opportunity by profit at the small reference size.
    pub best_opportunity: Option<OpportunitySummary>,
    /// Sum of small-reference profit across all opportunities.
    pub total_profit_at_small: Decimal,
}

impl ScanSummary {
    /// Records the result of evaluating one pair.
    pub fn record(&mut self, result: Option<&ArbitrageOpportunity>) {
        self.pairs_scanned += 1;
        let Some(opportunity) = result else {
            return;
        };

        self.opportunities += 1;
        self.total_profit_at_small += opportunity.profit_at_small.profit;

        let summary = OpportunitySummary::from(opportunity);
        let is_better = self
            .best_opportunity
            .as_ref()
            .map_or(true, |best| summary.profit_at_small > best.profit_at_small);
        if is_better {
            self.best_opportunity = Some(summary);
        }
    }

    /// Fraction of scanned pairs with an opportunity.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.pairs_scanned == 0 {
            return 0.0;
        }
        f64::from(self.opportunities) / f64::from(self.pairs_scanned)
    }
}

/// Summary of a single opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySummary {
    pub market1_id: String,
    pub market2_id: String,
    pub strategy: String,
    pub profit_at_small: Decimal,
    pub max_profitable_shares: u64,
    pub confidence: f64,
}

impl From<&ArbitrageOpportunity> for OpportunitySummary {
    fn from(opp: &ArbitrageOpportunity) -> Self {
        Self {
            market1_id: opp.market1.market_id.clone(),
            market2_id: opp.market2.market_id.clone(),
            strategy: opp.strategy.description.clone(),
            profit_at_small: opp.profit_at_small.profit,
            max_profitable_shares: opp.max_profitable_shares,
            confidence: opp.confidence,
        }
    }
}
