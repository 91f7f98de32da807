//! Risk metrics attached to a selected opportunity.
//!
//! Both metrics are heuristics describing book shape and liquidity. The
//! confidence score is a fixed weighted blend, not a statistical interval.

use depth_arb_core::OrderBookLevel;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::execution::depth_weighted_price;

/// Weight of the size component in the confidence score.
pub const SIZE_WEIGHT: f64 = 0.4;
/// Weight of the reference-profit component in the confidence score.
pub const PROFIT_WEIGHT: f64 = 0.3;
/// Weight of the book-depth component in the confidence score.
pub const DEPTH_WEIGHT: f64 = 0.3;

/// Max profitable size that saturates the size component.
const SIZE_SATURATION: f64 = 1000.0;
/// Profit at the small reference size that saturates the profit component.
const PROFIT_SATURATION: f64 = 10.0;
/// Combined YES level count that saturates the depth component.
const DEPTH_SATURATION: f64 = 20.0;

/// Slippage implied by book shape, in percentage points.
///
/// Compares each leg's top of book with the size-weighted average of every
/// resting level on that side: `avg(asks) - best_ask` for the buy leg plus
/// `best_bid - avg(bids)` for the sell leg, times 100. Independent of trade
/// size. An empty side contributes nothing.
#[must_use]
pub fn slippage_risk_pct(buy_asks: &[OrderBookLevel], sell_bids: &[OrderBookLevel]) -> Decimal {
    let buy_component = match (best_price(buy_asks, true), depth_weighted_price(buy_asks)) {
        (Some(best_ask), Some(avg)) => avg - best_ask,
        _ => Decimal::ZERO,
    };
    let sell_component = match (best_price(sell_bids, false), depth_weighted_price(sell_bids)) {
        (Some(best_bid), Some(avg)) => best_bid - avg,
        _ => Decimal::ZERO,
    };

    (buy_component + sell_component) * Decimal::ONE_HUNDRED
}

/// Confidence score in `[0, 1]`.
///
/// `0.4 * min(max_shares / 1000, 1) + 0.3 * min(profit_small / 10, 1)
/// + 0.3 * min((depth1 + depth2) / 20, 1)` where `depth_i` is the number of
/// resting YES levels (bids plus asks) in market `i`.
#[must_use]
pub fn confidence_score(
    max_profitable_shares: u64,
    profit_at_small: Decimal,
    market1_yes_levels: usize,
    market2_yes_levels: usize,
) -> f64 {
    let size_component = saturate(max_profitable_shares as f64 / SIZE_SATURATION);
    let profit_component = saturate(profit_at_small.to_f64().unwrap_or(0.0) / PROFIT_SATURATION);
    let depth_component =
        saturate((market1_yes_levels + market2_yes_levels) as f64 / DEPTH_SATURATION);

    SIZE_WEIGHT * size_component + PROFIT_WEIGHT * profit_component + DEPTH_WEIGHT * depth_component
}

fn saturate(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

fn best_price(levels: &[OrderBookLevel], lowest: bool) -> Option<Decimal> {
    let prices = levels
        .iter()
        .filter(|l| l.size > Decimal::ZERO)
        .map(|l| l.price);
    if lowest {
        prices.min()
    } else {
        prices.max()
    }
}
