//! Payoff and price statistics around a selected opportunity.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ArbitrageOpportunity, MarketPriceRanges, MarketSlot, ProfitPoint};

/// P&L at resolution of a position bought on one leg and sold on the other.
///
/// The position is long `shares` of the bought outcome and short `shares` of
/// the sold outcome. While the declared correlation holds both outcomes
/// resolve together and the execution profit is locked in; if it breaks, one
/// leg pays out without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPayoffs {
    /// Both outcomes resolve the same way.
    pub correlated: Decimal,
    /// Only the bought outcome resolves YES.
    pub bought_only: Decimal,
    /// Only the sold outcome resolves YES.
    pub sold_only: Decimal,
}

impl SettlementPayoffs {
    /// Lowest payoff across the three resolutions.
    #[must_use]
    pub fn worst_case(&self) -> Decimal {
        self.correlated.min(self.bought_only).min(self.sold_only)
    }
}

/// Settlement payoffs for a sized execution.
#[must_use]
pub fn settlement_payoffs(point: &ProfitPoint) -> SettlementPayoffs {
    let shares = Decimal::from(point.shares);
    SettlementPayoffs {
        correlated: point.profit,
        bought_only: point.profit + shares,
        sold_only: point.profit - shares,
    }
}

/// Sample standard deviation of successive price changes.
///
/// Returns `None` with fewer than three prices.
#[must_use]
pub fn realized_volatility(prices: &[Decimal]) -> Option<f64> {
    if prices.len() < 3 {
        return None;
    }

    let changes: Vec<f64> = prices
        .windows(2)
        .map(|w| (w[1] - w[0]).to_f64().unwrap_or(0.0))
        .collect();
    let n = changes.len() as f64;
    let mean = changes.iter().sum::<f64>() / n;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// Headline gap between the sold and bought outcome midpoints.
///
/// This is the edge a midpoint-only comparison would report, before depth and
/// spread are accounted for. `None` if either outcome lacks a midpoint.
#[must_use]
pub fn midpoint_gap(opportunity: &ArbitrageOpportunity) -> Option<Decimal> {
    let (buy_market, sell_market) = legs(opportunity);
    let buy_mid = buy_market.outcome(opportunity.strategy.buy_outcome).midpoint?;
    let sell_mid = sell_market.outcome(opportunity.strategy.sell_outcome).midpoint?;
    Some(sell_mid - buy_mid)
}

fn legs(opportunity: &ArbitrageOpportunity) -> (&MarketPriceRanges, &MarketPriceRanges) {
    match opportunity.strategy.buy_slot {
        MarketSlot::First => (&opportunity.market1, &opportunity.market2),
        MarketSlot::Second => (&opportunity.market2, &opportunity.market1),
    }
}
