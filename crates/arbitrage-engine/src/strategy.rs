//! Candidate strategy enumeration and selection.
//!
//! A candidate is one two-leg trade: buy an outcome in one market and sell the
//! correlated outcome in the other. The legs considered for each
//! [`CorrelationType`] come from a fixed table:
//!
//! ```text
//! SAME      buy m1 YES / sell m2 YES    OPPOSITE  buy m1 YES / sell m2 NO
//!           buy m1 NO  / sell m2 NO               buy m1 NO  / sell m2 YES
//!           buy m2 YES / sell m1 YES
//!           buy m2 NO  / sell m1 NO
//! ```
//!
//! Table order is also the tie-break order during selection.

use depth_arb_core::{EngineConfig, Outcome};
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::sizing::profit_at;
use crate::types::{CorrelationType, MarketPriceRanges, MarketSlot, PriceRange, ProfitPoint};

/// One row of the leg table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegTemplate {
    pub buy_market: MarketSlot,
    pub buy_outcome: Outcome,
    pub sell_outcome: Outcome,
}

impl LegTemplate {
    const fn new(buy_market: MarketSlot, buy_outcome: Outcome, sell_outcome: Outcome) -> Self {
        Self {
            buy_market,
            buy_outcome,
            sell_outcome,
        }
    }

    #[must_use]
    pub fn sell_market(&self) -> MarketSlot {
        self.buy_market.other()
    }
}

const SAME_LEGS: [LegTemplate; 4] = [
    LegTemplate::new(MarketSlot::First, Outcome::Yes, Outcome::Yes),
    LegTemplate::new(MarketSlot::First, Outcome::No, Outcome::No),
    LegTemplate::new(MarketSlot::Second, Outcome::Yes, Outcome::Yes),
    LegTemplate::new(MarketSlot::Second, Outcome::No, Outcome::No),
];

const OPPOSITE_LEGS: [LegTemplate; 2] = [
    LegTemplate::new(MarketSlot::First, Outcome::Yes, Outcome::No),
    LegTemplate::new(MarketSlot::First, Outcome::No, Outcome::Yes),
];

/// Returns the legs considered for a correlation type, in tie-break order.
#[must_use]
pub fn leg_table(correlation: CorrelationType) -> &'static [LegTemplate] {
    match correlation {
        CorrelationType::Same => &SAME_LEGS,
        CorrelationType::Opposite => &OPPOSITE_LEGS,
    }
}

/// A leg that passed the top-of-book filter, with profit at both reference sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateStrategy<'a> {
    pub leg: LegTemplate,
    pub buy_market: &'a MarketPriceRanges,
    pub sell_market: &'a MarketPriceRanges,
    pub buy_range: &'a PriceRange,
    pub sell_range: &'a PriceRange,
    pub buy_best_ask: Decimal,
    pub sell_best_bid: Decimal,
    pub profit_at_small: ProfitPoint,
    pub profit_at_large: ProfitPoint,
}

impl CandidateStrategy<'_> {
    /// Returns a human-readable description of the trade.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Buy {} in {} @ {}, sell {} in {} @ {}",
            self.leg.buy_outcome,
            self.buy_market.label,
            self.buy_best_ask,
            self.leg.sell_outcome,
            self.sell_market.label,
            self.sell_best_bid,
        )
    }
}

/// Enumerates the legs whose best bid on the sell side exceeds the best ask on
/// the buy side, and prices each at the configured reference sizes.
#[must_use]
pub fn enumerate<'a>(
    market1: &'a MarketPriceRanges,
    market2: &'a MarketPriceRanges,
    correlation: CorrelationType,
    config: &EngineConfig,
) -> Vec<CandidateStrategy<'a>> {
    let slot = |s: MarketSlot| match s {
        MarketSlot::First => market1,
        MarketSlot::Second => market2,
    };

    leg_table(correlation)
        .iter()
        .filter_map(|leg| {
            let buy_market = slot(leg.buy_market);
            let sell_market = slot(leg.sell_market());
            let buy_range = buy_market.outcome(leg.buy_outcome);
            let sell_range = sell_market.outcome(leg.sell_outcome);

            let (Some(buy_best_ask), Some(sell_best_bid)) = (buy_range.best_ask, sell_range.best_bid)
            else {
                trace!(
                    buy_market = %buy_market.market_id,
                    buy_outcome = %leg.buy_outcome,
                    sell_market = %sell_market.market_id,
                    sell_outcome = %leg.sell_outcome,
                    "Leg skipped - empty book side"
                );
                return None;
            };

            if sell_best_bid <= buy_best_ask {
                trace!(
                    buy_market = %buy_market.market_id,
                    buy_outcome = %leg.buy_outcome,
                    buy_best_ask = %buy_best_ask,
                    sell_market = %sell_market.market_id,
                    sell_outcome = %leg.sell_outcome,
                    sell_best_bid = %sell_best_bid,
                    "Leg skipped - bid does not exceed ask"
                );
                return None;
            }

            let profit_at_small =
                profit_at(&buy_range.asks, &sell_range.bids, config.small_reference_size);
            let profit_at_large =
                profit_at(&buy_range.asks, &sell_range.bids, config.large_reference_size);

            debug!(
                buy_market = %buy_market.market_id,
                buy_outcome = %leg.buy_outcome,
                sell_market = %sell_market.market_id,
                sell_outcome = %leg.sell_outcome,
                profit_small = %profit_at_small.profit,
                profit_large = %profit_at_large.profit,
                "Candidate leg evaluated"
            );

            Some(CandidateStrategy {
                leg: *leg,
                buy_market,
                sell_market,
                buy_range,
                sell_range,
                buy_best_ask,
                sell_best_bid,
                profit_at_small,
                profit_at_large,
            })
        })
        .collect()
}

/// Picks the candidate with the highest positive profit at the small reference size.
///
/// Ties keep the earliest candidate in enumeration order.
#[must_use]
pub fn select_best(candidates: Vec<CandidateStrategy<'_>>) -> Option<CandidateStrategy<'_>> {
    candidates
        .into_iter()
        .filter(|c| c.profit_at_small.profit > Decimal::ZERO)
        .fold(None, |best, candidate| match best {
            Some(current) if candidate.profit_at_small.profit <= current.profit_at_small.profit => {
                Some(current)
            }
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use depth_arb_core::{MarketOrderBook, OutcomeOrderBook};
    use rust_decimal_macros::dec;

    fn outcome_book(bid: Decimal, ask: Decimal, depth: Decimal) -> OutcomeOrderBook {
        OutcomeOrderBook::from_tuples(vec![(bid, depth)], vec![(ask, depth)])
    }

    fn ranges(id: &str, yes: OutcomeOrderBook, no: OutcomeOrderBook) -> MarketPriceRanges {
        MarketPriceRanges::from_market(&MarketOrderBook::new(id, id.to_uppercase(), yes, no))
    }

    #[test]
    fn test_leg_table_sizes_and_order() {
        let same = leg_table(CorrelationType::Same);
        assert_eq!(same.len(), 4);
        assert_eq!(same[0].buy_market, MarketSlot::First);
        assert_eq!(same[1].buy_outcome, Outcome::No);
        assert_eq!(same[2].buy_market, MarketSlot::Second);
        assert!(same.iter().all(|l| l.buy_outcome == l.sell_outcome));

        let opposite = leg_table(CorrelationType::Opposite);
        assert_eq!(opposite.len(), 2);
        assert!(opposite.iter().all(|l| l.buy_outcome != l.sell_outcome));
        assert!(opposite.iter().all(|l| l.buy_market == MarketSlot::First));
    }

    #[test]
    fn test_enumerate_same_filters_by_top_of_book() {
        // m1 YES ask 0.40 < m2 YES bid 0.55; every other leg is blocked
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.38), dec!(0.40), dec!(1000)),
            outcome_book(dec!(0.40), dec!(0.62), dec!(1000)),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.55), dec!(0.57), dec!(1000)),
            outcome_book(dec!(0.41), dec!(0.45), dec!(1000)),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.leg.buy_outcome, Outcome::Yes);
        assert_eq!(candidate.buy_market.market_id, "a");
        assert_eq!(candidate.sell_market.market_id, "b");
        assert_eq!(candidate.profit_at_small.profit, dec!(15));
        assert_eq!(candidate.profit_at_large.profit, dec!(150));
    }

    #[test]
    fn test_enumerate_never_proposes_when_bid_equals_ask() {
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.45), dec!(0.50), dec!(100)),
            outcome_book(dec!(0.45), dec!(0.50), dec!(100)),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.50), dec!(0.55), dec!(100)),
            outcome_book(dec!(0.50), dec!(0.55), dec!(100)),
        );

        for correlation in [CorrelationType::Same, CorrelationType::Opposite] {
            let candidates = enumerate(&m1, &m2, correlation, &EngineConfig::default());
            assert!(candidates.is_empty());
        }
    }

    #[test]
    fn test_enumerate_skips_empty_sides() {
        let m1 = ranges("a", OutcomeOrderBook::default(), OutcomeOrderBook::default());
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.90), dec!(0.95), dec!(100)),
            outcome_book(dec!(0.90), dec!(0.95), dec!(100)),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_enumerate_opposite_pairs_yes_with_no() {
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.28), dec!(0.30), dec!(1000)),
            outcome_book(dec!(0.68), dec!(0.72), dec!(1000)),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.22), dec!(0.25), dec!(1000)),
            outcome_book(dec!(0.75), dec!(0.78), dec!(1000)),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Opposite, &EngineConfig::default());

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].leg.buy_outcome, Outcome::Yes);
        assert_eq!(candidates[0].leg.sell_outcome, Outcome::No);
        assert_eq!(candidates[0].profit_at_small.profit, dec!(45));
    }

    #[test]
    fn test_select_best_prefers_highest_profit() {
        // Both YES (edge 0.05) and NO (edge 0.10) legs from m1 to m2 qualify
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.30), dec!(0.40), dec!(1000)),
            outcome_book(dec!(0.30), dec!(0.40), dec!(1000)),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.45), dec!(0.60), dec!(1000)),
            outcome_book(dec!(0.50), dec!(0.60), dec!(1000)),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());
        assert_eq!(candidates.len(), 2);

        let best = select_best(candidates).unwrap();
        assert_eq!(best.leg.buy_outcome, Outcome::No);
        assert_eq!(best.profit_at_small.profit, dec!(10));
    }

    #[test]
    fn test_select_best_ties_keep_enumeration_order() {
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.30), dec!(0.40), dec!(1000)),
            outcome_book(dec!(0.30), dec!(0.40), dec!(1000)),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.50), dec!(0.60), dec!(1000)),
            outcome_book(dec!(0.50), dec!(0.60), dec!(1000)),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());
        let best = select_best(candidates).unwrap();

        assert_eq!(best.leg, leg_table(CorrelationType::Same)[0]);
    }

    #[test]
    fn test_select_best_rejects_unprofitable_candidates() {
        // Top-of-book edge of 0.01; overflow reuses the single levels, so 100 shares still profit
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.30), dec!(0.40), dec!(10)),
            OutcomeOrderBook::default(),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.41), dec!(0.60), dec!(10)),
            OutcomeOrderBook::default(),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].profit_at_small.profit > Decimal::ZERO);

        let thin_bid = ranges(
            "c",
            OutcomeOrderBook::from_tuples(
                vec![(dec!(0.41), dec!(10)), (dec!(0.01), dec!(1000))],
                vec![(dec!(0.60), dec!(10))],
            ),
            OutcomeOrderBook::default(),
        );
        // A deep 0.01 bid behind the top level turns the 100-share walk negative
        let candidates = enumerate(&m1, &thin_bid, CorrelationType::Same, &EngineConfig::default());
        assert_eq!(candidates.len(), 1);
        assert!(select_best(candidates).is_none());
    }

    #[test]
    fn test_describe() {
        let m1 = ranges(
            "a",
            outcome_book(dec!(0.38), dec!(0.40), dec!(1000)),
            OutcomeOrderBook::default(),
        );
        let m2 = ranges(
            "b",
            outcome_book(dec!(0.55), dec!(0.57), dec!(1000)),
            OutcomeOrderBook::default(),
        );

        let candidates = enumerate(&m1, &m2, CorrelationType::Same, &EngineConfig::default());
        assert_eq!(candidates[0].describe(), "Buy YES in A @ 0.40, sell YES in B @ 0.55");
    }
}
