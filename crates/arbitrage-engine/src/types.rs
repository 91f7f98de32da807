//! Shared types for execution-aware arbitrage evaluation.
//!
//! This module defines the values that flow through the engine:
//! - [`CorrelationType`]: declared relationship between two markets
//! - [`ExecutionSummary`]: result of walking one side of one outcome book
//! - [`PriceRange`]: top-of-book plus sorted levels for one outcome
//! - [`ProfitPoint`]: one sample on the profit-vs-size curve
//! - [`ArbitrageOpportunity`]: the engine's output

use chrono::{DateTime, Utc};
use depth_arb_core::{MarketOrderBook, OrderBookLevel, Outcome, OutcomeOrderBook};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

// =============================================================================
// Correlation
// =============================================================================

/// Declared relationship between two markets' outcomes.
///
/// Supplied by an external correlation-detection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CorrelationType {
    /// The YES outcomes of both markets resolve together.
    Same,
    /// YES in the first market resolves together with NO in the second.
    Opposite,
}

impl CorrelationType {
    /// Returns the display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Same => "SAME",
            Self::Opposite => "OPPOSITE",
        }
    }

    /// Returns the outcome in the second market that resolves together with
    /// `outcome` in the first market.
    #[must_use]
    pub fn paired_outcome(self, outcome: Outcome) -> Outcome {
        match self {
            Self::Same => outcome,
            Self::Opposite => outcome.opposite(),
        }
    }
}

impl fmt::Display for CorrelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CorrelationType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAME" => Ok(Self::Same),
            "OPPOSITE" => Ok(Self::Opposite),
            _ => Err(EngineError::UnknownCorrelation(s.to_string())),
        }
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Whether an execution takes liquidity from asks or bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Lift asks, best (lowest) price first.
    Buy,
    /// Hit bids, best (highest) price first.
    Sell,
}

impl Direction {
    /// Price assumed for size beyond an empty book side.
    #[must_use]
    pub fn empty_book_price(self) -> Decimal {
        match self {
            Self::Buy => Decimal::ONE,
            Self::Sell => Decimal::ZERO,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Result of walking one side of an outcome book for a requested size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub direction: Direction,
    pub requested_size: Decimal,
    /// Always equals `requested_size`; size beyond the book is filled at the worst price.
    pub filled_size: Decimal,
    /// Sum of price times size over every filled unit, overflow included.
    pub total_notional: Decimal,
    /// Volume-weighted average price, `None` when nothing was requested.
    pub average_price: Option<Decimal>,
    /// Resting levels consumed, with the size taken from each.
    pub levels_used: Vec<OrderBookLevel>,
    /// Portion of the fill priced beyond the resting depth.
    pub overflow_size: Decimal,
    /// Adverse deviation of the average from top of book, in percent.
    pub slippage_pct: Option<Decimal>,
}

impl ExecutionSummary {
    /// Returns true if the walk ran past the resting depth.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overflow_size > Decimal::ZERO
    }
}

// =============================================================================
// Price ranges
// =============================================================================

/// Top of book plus the full sorted levels for one outcome of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub outcome: Outcome,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub midpoint: Option<Decimal>,
    pub spread: Option<Decimal>,
    /// Bids sorted descending by price.
    pub bids: Vec<OrderBookLevel>,
    /// Asks sorted ascending by price.
    pub asks: Vec<OrderBookLevel>,
}

impl PriceRange {
    /// Extracts the price range of one outcome book.
    #[must_use]
    pub fn from_book(outcome: Outcome, book: &OutcomeOrderBook) -> Self {
        let sorted = OutcomeOrderBook::new(book.bids.clone(), book.asks.clone());
        let top = sorted.top_of_book();

        Self {
            outcome,
            best_bid: top.best_bid,
            best_ask: top.best_ask,
            midpoint: top.midpoint,
            spread: top.spread,
            bids: sorted.bids,
            asks: sorted.asks,
        }
    }
}

/// Price ranges for both outcomes of one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPriceRanges {
    pub market_id: String,
    pub label: String,
    pub yes: PriceRange,
    pub no: PriceRange,
}

impl MarketPriceRanges {
    #[must_use]
    pub fn from_market(market: &MarketOrderBook) -> Self {
        Self {
            market_id: market.id.clone(),
            label: market.label.clone(),
            yes: PriceRange::from_book(Outcome::Yes, &market.yes),
            no: PriceRange::from_book(Outcome::No, &market.no),
        }
    }

    #[must_use]
    pub fn outcome(&self, outcome: Outcome) -> &PriceRange {
        match outcome {
            Outcome::Yes => &self.yes,
            Outcome::No => &self.no,
        }
    }

    /// Resting levels on the YES book, bids and asks combined.
    #[must_use]
    pub fn yes_level_count(&self) -> usize {
        self.yes.bids.len() + self.yes.asks.len()
    }
}

// =============================================================================
// Profit curve
// =============================================================================

/// One sample on the profit-vs-size curve of a two-leg strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitPoint {
    pub shares: u64,
    /// Average price paid on the buy leg.
    pub buy_price: Decimal,
    /// Average price received on the sell leg.
    pub sell_price: Decimal,
    pub total_cost: Decimal,
    pub total_revenue: Decimal,
    /// `total_revenue - total_cost`, in dollars.
    pub profit: Decimal,
    pub profit_per_share: Decimal,
}

// =============================================================================
// Opportunity
// =============================================================================

/// Which of the two evaluated markets a leg trades in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketSlot {
    First,
    Second,
}

impl MarketSlot {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// The chosen two-leg execution: buy one outcome in one market, sell an
/// outcome in the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStrategy {
    /// Market the buy leg trades in; the sell leg trades in the other one.
    pub buy_slot: MarketSlot,
    pub buy_market_id: String,
    pub buy_market_label: String,
    pub buy_outcome: Outcome,
    pub buy_best_ask: Decimal,
    pub sell_market_id: String,
    pub sell_market_label: String,
    pub sell_outcome: Outcome,
    pub sell_best_bid: Decimal,
    /// Human-readable summary, e.g. "Buy YES in A @ 0.40, sell YES in B @ 0.55".
    pub description: String,
}

impl ExecutionStrategy {
    /// Top-of-book edge per share before any depth is considered.
    #[must_use]
    pub fn headline_edge(&self) -> Decimal {
        self.sell_best_bid - self.buy_best_ask
    }
}

/// A liquidity-bounded arbitrage between two correlated markets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    pub market1: MarketPriceRanges,
    pub market2: MarketPriceRanges,
    pub correlation: CorrelationType,
    pub strategy: ExecutionStrategy,
    /// Ascending by `shares`, no duplicates.
    pub profit_curve: Vec<ProfitPoint>,
    /// Profit at the small reference size (100 shares by default).
    pub profit_at_small: ProfitPoint,
    /// Profit at the large reference size (1000 shares by default).
    pub profit_at_large: ProfitPoint,
    /// Largest size found by the search with positive profit.
    pub max_profitable_shares: u64,
    /// Book-shape slippage of both legs, in percentage points.
    pub slippage_risk_pct: Decimal,
    /// Heuristic score in `[0, 1]`, not a statistical confidence interval.
    pub confidence: f64,
    pub detected_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// Returns the curve point with the highest profit.
    #[must_use]
    pub fn peak_profit(&self) -> Option<&ProfitPoint> {
        self.profit_curve.iter().max_by(|a, b| a.profit.cmp(&b.profit))
    }

    /// Returns the return on cost at the small reference size, in percent.
    ///
    /// `None` for a zero cost or a ratio beyond the decimal range.
    #[must_use]
    pub fn roi_pct(&self) -> Option<Decimal> {
        let point = &self.profit_at_small;
        if point.total_cost == Decimal::ZERO {
            return None;
        }
        point
            .profit
            .checked_div(point.total_cost)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_correlation_from_str() {
        assert_eq!("same".parse::<CorrelationType>().unwrap(), CorrelationType::Same);
        assert_eq!(" OPPOSITE ".parse::<CorrelationType>().unwrap(), CorrelationType::Opposite);
        assert_eq!("Opposite".parse::<CorrelationType>().unwrap(), CorrelationType::Opposite);
    }

    #[test]
    fn test_correlation_from_str_rejects_unknown() {
        let err = "inverse".parse::<CorrelationType>().unwrap_err();
        assert_eq!(err, EngineError::UnknownCorrelation("inverse".to_string()));
    }

    #[test]
    fn test_paired_outcome() {
        assert_eq!(CorrelationType::Same.paired_outcome(Outcome::Yes), Outcome::Yes);
        assert_eq!(CorrelationType::Opposite.paired_outcome(Outcome::Yes), Outcome::No);
        assert_eq!(CorrelationType::Opposite.paired_outcome(Outcome::No), Outcome::Yes);
    }

    #[test]
    fn test_correlation_serde_uppercase() {
        let json = serde_json::to_string(&CorrelationType::Opposite).unwrap();
        assert_eq!(json, "\"OPPOSITE\"");
    }

    #[test]
    fn test_empty_book_price() {
        assert_eq!(Direction::Buy.empty_book_price(), Decimal::ONE);
        assert_eq!(Direction::Sell.empty_book_price(), Decimal::ZERO);
    }

    #[test]
    fn test_price_range_from_unsorted_book() {
        let book = OutcomeOrderBook {
            bids: vec![
                OrderBookLevel::new(dec!(0.40), dec!(10)),
                OrderBookLevel::new(dec!(0.42), dec!(5)),
            ],
            asks: vec![
                OrderBookLevel::new(dec!(0.47), dec!(10)),
                OrderBookLevel::new(dec!(0.45), dec!(5)),
            ],
        };

        let range = PriceRange::from_book(Outcome::Yes, &book);
        assert_eq!(range.best_bid, Some(dec!(0.42)));
        assert_eq!(range.best_ask, Some(dec!(0.45)));
        assert_eq!(range.bids[0].price, dec!(0.42));
        assert_eq!(range.asks[0].price, dec!(0.45));
    }

    #[test]
    fn test_headline_edge() {
        let strategy = ExecutionStrategy {
            buy_slot: MarketSlot::First,
            buy_market_id: "a".to_string(),
            buy_market_label: "A".to_string(),
            buy_outcome: Outcome::Yes,
            buy_best_ask: dec!(0.40),
            sell_market_id: "b".to_string(),
            sell_market_label: "B".to_string(),
            sell_outcome: Outcome::Yes,
            sell_best_bid: dec!(0.55),
            description: String::new(),
        };

        assert_eq!(strategy.headline_edge(), dec!(0.15));
    }
}
