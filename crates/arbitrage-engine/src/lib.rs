//! Execution-aware arbitrage between correlated binary prediction markets.
//!
//! Given two market order books and a declared correlation, this crate finds
//! the two-leg trade that is actually executable against the resting depth,
//! not just the headline price gap.
//!
//! # Overview
//!
//! ```text
//! Market A (YES):  asks 0.40 x 1000, 0.70 x 5000
//! Market B (YES):  bids 0.55 x 100000
//! Correlation:     SAME
//!
//! Strategy:        Buy YES in A, sell YES in B
//! 100 shares:      cost $40.00, revenue $55.00, profit $15.00
//! Max size:        1999 shares (deeper asks at 0.70 erase the edge)
//! ```
//!
//! # Modules
//!
//! - [`types`]: Values flowing through the engine
//! - [`execution`]: Order book walking with worst-price overflow
//! - [`strategy`]: Leg enumeration per correlation type and selection
//! - [`sizing`]: Profit at size, max-size search and profit curve
//! - [`risk`]: Slippage risk and confidence score
//! - [`analytics`]: Settlement payoffs, volatility and midpoint gap
//! - [`engine`]: The [`ArbitrageEngine`] entry point and scan summaries
//!
//! # Example
//!
//! ```
//! use depth_arb_core::{MarketOrderBook, OutcomeOrderBook};
//! use depth_arb_engine::{ArbitrageEngine, CorrelationType};
//! use rust_decimal_macros::dec;
//!
//! let a = MarketOrderBook::new(
//!     "a",
//!     "Market A",
//!     OutcomeOrderBook::from_tuples(vec![(dec!(0.38), dec!(1000))], vec![(dec!(0.40), dec!(1000))]),
//!     OutcomeOrderBook::default(),
//! );
//! let b = MarketOrderBook::new(
//!     "b",
//!     "Market B",
//!     OutcomeOrderBook::from_tuples(vec![(dec!(0.55), dec!(1000))], vec![(dec!(0.57), dec!(1000))]),
//!     OutcomeOrderBook::default(),
//! );
//!
//! let opportunity = ArbitrageEngine::new()
//!     .calculate_arbitrage(&a, &b, CorrelationType::Same)
//!     .expect("profitable pair");
//! assert_eq!(opportunity.profit_at_small.profit, dec!(15));
//! ```
//!
//! # Caveats
//!
//! The engine models size beyond the book as filled at the worst resting
//! price, and the max-size search assumes profit declines once it turns
//! negative. Neither is guaranteed on real books; treat `max_profitable_shares`
//! as an estimate.

pub mod analytics;
pub mod engine;
pub mod error;
pub mod execution;
pub mod risk;
pub mod sizing;
pub mod strategy;
pub mod types;

// Re-export main types for convenience
pub use analytics::{midpoint_gap, realized_volatility, settlement_payoffs, SettlementPayoffs};
pub use engine::{ArbitrageEngine, OpportunitySummary, ScanSummary};
pub use error::EngineError;
pub use execution::simulate;
pub use strategy::{CandidateStrategy, LegTemplate};
pub use types::{
    ArbitrageOpportunity, CorrelationType, Direction, ExecutionStrategy, ExecutionSummary,
    MarketPriceRanges, MarketSlot, PriceRange, ProfitPoint,
};
