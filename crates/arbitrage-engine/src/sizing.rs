//! Trade sizing for a chosen two-leg strategy.
//!
//! - [`profit_at`]: walks both legs for one size
//! - [`find_max_size`]: binary search for the largest profitable size
//! - [`profit_curve`]: samples profit across sizes for display

use depth_arb_core::OrderBookLevel;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

use crate::execution::simulate;
use crate::types::{Direction, ProfitPoint};

/// Profit of buying `shares` against `buy_asks` and selling them into `sell_bids`.
///
/// Both legs are walked in full, so the result includes slippage and the
/// worst-price overflow policy of [`simulate`].
#[must_use]
pub fn profit_at(
    buy_asks: &[OrderBookLevel],
    sell_bids: &[OrderBookLevel],
    shares: u64,
) -> ProfitPoint {
    let size = Decimal::from(shares);
    let buy = simulate(buy_asks, size, Direction::Buy);
    let sell = simulate(sell_bids, size, Direction::Sell);

    let total_cost = buy.total_notional;
    let total_revenue = sell.total_notional;
    let profit = total_revenue - total_cost;
    let profit_per_share = if shares == 0 {
        Decimal::ZERO
    } else {
        profit / size
    };

    ProfitPoint {
        shares,
        buy_price: buy.average_price.unwrap_or(Decimal::ZERO),
        sell_price: sell.average_price.unwrap_or(Decimal::ZERO),
        total_cost,
        total_revenue,
        profit,
        profit_per_share,
    }
}

/// Largest size in `[1, cap]` with positive profit, or `0` if none is found.
///
/// Profit-vs-size is assumed to decline monotonically past the optimum, which
/// real books do not guarantee; a thin intermediate level can make this miss
/// a profitable size above the first unprofitable midpoint.
#[must_use]
pub fn find_max_size(buy_asks: &[OrderBookLevel], sell_bids: &[OrderBookLevel], cap: u64) -> u64 {
    let mut low = 1_u64;
    let mut high = cap;
    let mut best = 0_u64;
    let mut steps = 0_u32;

    while low <= high {
        let mid = low + (high - low) / 2;
        steps += 1;
        if profit_at(buy_asks, sell_bids, mid).profit > Decimal::ZERO {
            best = mid;
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }

    debug!(max_size = best, cap, steps, "Max profitable size search finished");
    best
}

/// Samples the profit curve up to `max_size`.
///
/// Takes `samples` evenly spaced sizes starting at
/// `step = max(1, max_size / samples)` and adds every checkpoint that fits
/// under `max_size`. Points are unique and ascending by `shares`.
#[must_use]
pub fn profit_curve(
    buy_asks: &[OrderBookLevel],
    sell_bids: &[OrderBookLevel],
    max_size: u64,
    samples: u64,
    checkpoints: &[u64],
) -> Vec<ProfitPoint> {
    curve_sizes(max_size, samples, checkpoints)
        .into_iter()
        .map(|shares| profit_at(buy_asks, sell_bids, shares))
        .collect()
}

fn curve_sizes(max_size: u64, samples: u64, checkpoints: &[u64]) -> BTreeSet<u64> {
    let mut sizes = BTreeSet::new();
    if max_size == 0 {
        return sizes;
    }

    let step = (max_size / samples.max(1)).max(1);
    for i in 1..=samples {
        let size = step * i;
        if size > max_size {
            break;
        }
        sizes.insert(size);
    }

    sizes.extend(
        checkpoints
            .iter()
            .copied()
            .filter(|&c| c > 0 && c <= max_size),
    );
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const CHECKPOINTS: [u64; 5] = [10, 50, 100, 500, 1000];

    fn single_level(price: Decimal, size: Decimal) -> Vec<OrderBookLevel> {
        vec![OrderBookLevel::new(price, size)]
    }

    /// Asks get worse after 1000 shares, eroding the 0.15 edge.
    fn steep_asks() -> Vec<OrderBookLevel> {
        vec![
            OrderBookLevel::new(dec!(0.40), dec!(1000)),
            OrderBookLevel::new(dec!(0.70), dec!(5000)),
        ]
    }

    #[test]
    fn test_profit_at_flat_books() {
        let point = profit_at(
            &single_level(dec!(0.40), dec!(1000)),
            &single_level(dec!(0.55), dec!(1000)),
            100,
        );

        assert_eq!(point.shares, 100);
        assert_eq!(point.buy_price, dec!(0.40));
        assert_eq!(point.sell_price, dec!(0.55));
        assert_eq!(point.total_cost, dec!(40));
        assert_eq!(point.total_revenue, dec!(55));
        assert_eq!(point.profit, dec!(15));
        assert_eq!(point.profit_per_share, dec!(0.15));
    }

    #[test]
    fn test_profit_at_zero_shares() {
        let point = profit_at(&steep_asks(), &single_level(dec!(0.55), dec!(10)), 0);

        assert_eq!(point.profit, Decimal::ZERO);
        assert_eq!(point.profit_per_share, Decimal::ZERO);
    }

    #[test]
    fn test_find_max_size_stops_where_edge_is_erased() {
        let bids = single_level(dec!(0.55), dec!(100000));
        let max = find_max_size(&steep_asks(), &bids, 100_000);

        // Profit at n > 1000: 0.55n - (400 + 0.70(n - 1000)) = 300 - 0.15n > 0  <=>  n < 2000
        assert_eq!(max, 1999);
        assert!(profit_at(&steep_asks(), &bids, max).profit > Decimal::ZERO);
        assert!(profit_at(&steep_asks(), &bids, max + 1).profit <= Decimal::ZERO);
    }

    #[test]
    fn test_find_max_size_hits_cap_when_edge_never_erodes() {
        let max = find_max_size(
            &single_level(dec!(0.40), dec!(1000)),
            &single_level(dec!(0.55), dec!(1000)),
            100_000,
        );

        assert_eq!(max, 100_000);
    }

    #[test]
    fn test_find_max_size_unprofitable() {
        let max = find_max_size(
            &single_level(dec!(0.60), dec!(1000)),
            &single_level(dec!(0.55), dec!(1000)),
            100_000,
        );

        assert_eq!(max, 0);
    }

    #[test]
    fn test_curve_sizes_even_steps_and_checkpoints() {
        let sizes: Vec<u64> = curve_sizes(2000, 20, &CHECKPOINTS).into_iter().collect();

        // step 100 up to 2000, plus 10 and 50; 100/500/1000 already present
        assert_eq!(sizes.len(), 22);
        assert_eq!(sizes[0], 10);
        assert_eq!(sizes[1], 50);
        assert_eq!(sizes[2], 100);
        assert_eq!(*sizes.last().unwrap(), 2000);
    }

    #[test]
    fn test_curve_sizes_small_max() {
        let sizes: Vec<u64> = curve_sizes(7, 20, &CHECKPOINTS).into_iter().collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5, 6, 7]);

        assert!(curve_sizes(0, 20, &CHECKPOINTS).is_empty());
    }

    #[test]
    fn test_profit_curve_is_sorted_unique_and_additive() {
        let bids = single_level(dec!(0.55), dec!(100000));
        let curve = profit_curve(&steep_asks(), &bids, 1999, 20, &CHECKPOINTS);

        assert!(curve.windows(2).all(|w| w[0].shares < w[1].shares));
        for point in &curve {
            assert_eq!(point.profit, point.total_revenue - point.total_cost);
            assert_eq!(point.profit_per_share, point.profit / Decimal::from(point.shares));
        }
        for checkpoint in CHECKPOINTS {
            assert!(curve.iter().any(|p| p.shares == checkpoint));
        }
    }
}
