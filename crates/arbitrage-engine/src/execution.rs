//! Order book walking for execution simulation.
//!
//! Provides [`simulate`] to price a fill of a given size against one side of
//! one outcome book, plus depth helpers used by the risk metrics.

use depth_arb_core::OrderBookLevel;
use rust_decimal::Decimal;
use tracing::trace;

use crate::types::{Direction, ExecutionSummary};

/// Walk one side of an outcome book to price a fill of `requested_size`.
///
/// For buys this walks asks (ascending), for sells bids (descending). Levels
/// are re-sorted best-first on a copy, so callers may pass either order.
///
/// Size beyond the resting depth is never rejected: the remainder is priced at
/// the worst level on the book, or at `1` (buy) / `0` (sell) when the side is
/// empty. `filled_size` therefore always equals `requested_size`.
///
/// # Example
///
/// ```
/// use depth_arb_core::OrderBookLevel;
/// use depth_arb_engine::{execution::simulate, Direction};
/// use rust_decimal_macros::dec;
///
/// let asks = vec![OrderBookLevel::new(dec!(0.50), dec!(10))];
/// let fill = simulate(&asks, dec!(100), Direction::Buy);
/// assert_eq!(fill.filled_size, dec!(100));
/// assert_eq!(fill.average_price, Some(dec!(0.50)));
/// assert_eq!(fill.overflow_size, dec!(90));
/// ```
#[must_use]
pub fn simulate(
    levels: &[OrderBookLevel],
    requested_size: Decimal,
    direction: Direction,
) -> ExecutionSummary {
    let sorted = sorted_best_first(levels, direction);
    let best_price = sorted.first().map(|l| l.price);

    if requested_size <= Decimal::ZERO {
        return ExecutionSummary {
            direction,
            requested_size,
            filled_size: Decimal::ZERO,
            total_notional: Decimal::ZERO,
            average_price: None,
            levels_used: Vec::new(),
            overflow_size: Decimal::ZERO,
            slippage_pct: None,
        };
    }

    let mut remaining = requested_size;
    let mut total_notional = Decimal::ZERO;
    let mut levels_used = Vec::new();

    for level in &sorted {
        if remaining <= Decimal::ZERO {
            break;
        }
        let take = level.size.min(remaining);
        total_notional += take * level.price;
        remaining -= take;
        levels_used.push(OrderBookLevel::new(level.price, take));
    }

    let overflow_size = remaining.max(Decimal::ZERO);
    if overflow_size > Decimal::ZERO {
        let worst_price = sorted
            .last()
            .map_or_else(|| direction.empty_book_price(), |l| l.price);
        total_notional += overflow_size * worst_price;
        trace!(
            direction = %direction,
            requested = %requested_size,
            overflow = %overflow_size,
            worst_price = %worst_price,
            "Fill exceeds resting depth, pricing remainder at worst level"
        );
    }

    let average_price = total_notional / requested_size;

    ExecutionSummary {
        direction,
        requested_size,
        filled_size: requested_size,
        total_notional,
        average_price: Some(average_price),
        levels_used,
        overflow_size,
        slippage_pct: best_price.and_then(|best| slippage_pct(average_price, best, direction)),
    }
}

/// Adverse deviation of `average` from `best`, in percent.
///
/// Positive when the fill is worse than top of book on either side. `None`
/// when `best` is zero or the ratio exceeds the decimal range.
#[must_use]
pub fn slippage_pct(average: Decimal, best: Decimal, direction: Direction) -> Option<Decimal> {
    if best == Decimal::ZERO {
        return None;
    }
    let adverse = match direction {
        Direction::Buy => average - best,
        Direction::Sell => best - average,
    };
    adverse
        .checked_div(best)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Total resting size across levels, `None` if the sum overflows.
#[must_use]
pub fn total_depth(levels: &[OrderBookLevel]) -> Option<Decimal> {
    levels
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.size))
}

/// Size-weighted average price of every resting level.
///
/// Returns `None` for an empty side, or when depth or notional overflow.
#[must_use]
pub fn depth_weighted_price(levels: &[OrderBookLevel]) -> Option<Decimal> {
    let depth = total_depth(levels)?;
    if depth <= Decimal::ZERO {
        return None;
    }
    let notional = levels.iter().try_fold(Decimal::ZERO, |acc, l| {
        acc.checked_add(l.price.checked_mul(l.size)?)
    })?;
    notional.checked_div(depth)
}

fn sorted_best_first(levels: &[OrderBookLevel], direction: Direction) -> Vec<OrderBookLevel> {
    let mut sorted: Vec<OrderBookLevel> = levels
        .iter()
        .filter(|l| l.size > Decimal::ZERO)
        .copied()
        .collect();
    match direction {
        Direction::Buy => sorted.sort_by(|a, b| a.price.cmp(&b.price)),
        Direction::Sell => sorted.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    sorted
}
