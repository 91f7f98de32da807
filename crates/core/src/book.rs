//! Binary prediction market order book model.
//!
//! This module provides the immutable snapshot types the arbitrage engine consumes:
//! - [`OrderBookLevel`]: aggregated resting size at one price
//! - [`OutcomeOrderBook`]: bids and asks for one outcome (YES or NO)
//! - [`MarketOrderBook`]: both outcomes of a single market
//! - [`TopOfBook`]: best prices derived from one outcome's book
//!
//! Books are normalized on construction (empty levels dropped, bids sorted
//! descending, asks ascending). Crossed or stale books are accepted as-is.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BookError;

// =============================================================================
// Outcome
// =============================================================================

/// One of the two resolutions of a binary market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Yes,
    No,
}

impl Outcome {
    /// Returns the opposite outcome.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }

    /// Returns the display string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of an outcome book a level rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    Bid,
    Ask,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bid => write!(f, "bid"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

// =============================================================================
// Levels and outcome books
// =============================================================================

/// Aggregated resting size at a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// Price as a probability in `[0, 1]`.
    pub price: Decimal,
    /// Resting quantity in shares.
    pub size: Decimal,
}

impl OrderBookLevel {
    #[must_use]
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// Price times size.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

impl From<(Decimal, Decimal)> for OrderBookLevel {
    fn from((price, size): (Decimal, Decimal)) -> Self {
        Self::new(price, size)
    }
}

/// Best prices for one outcome.
///
/// `spread` and `midpoint` are only present when both sides have liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TopOfBook {
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub spread: Option<Decimal>,
    pub midpoint: Option<Decimal>,
}

/// Bids and asks for one outcome of one market.
///
/// Bids are kept sorted descending by price and asks ascending.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeOrderBook {
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}

impl OutcomeOrderBook {
    /// Creates a normalized outcome book from raw levels.
    #[must_use]
    pub fn new(bids: Vec<OrderBookLevel>, asks: Vec<OrderBookLevel>) -> Self {
        let mut book = Self { bids, asks };
        book.normalize();
        book
    }

    /// Creates a normalized outcome book from `(price, size)` tuples.
    #[must_use]
    pub fn from_tuples(bids: Vec<(Decimal, Decimal)>, asks: Vec<(Decimal, Decimal)>) -> Self {
        Self::new(
            bids.into_iter().map(OrderBookLevel::from).collect(),
            asks.into_iter().map(OrderBookLevel::from).collect(),
        )
    }

    /// Drops empty levels and restores the sort order of both sides.
    ///
    /// Sorting is stable, so duplicate prices keep their input order.
    pub fn normalize(&mut self) {
        self.bids.retain(|l| l.size > Decimal::ZERO);
        self.asks.retain(|l| l.size > Decimal::ZERO);
        self.bids.sort_by(|a, b| b.price.cmp(&a.price));
        self.asks.sort_by(|a, b| a.price.cmp(&b.price));
    }

    /// Returns the best (highest) bid price.
    #[must_use]
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Returns the best (lowest) ask price.
    #[must_use]
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Returns the bid-ask spread, if both sides have liquidity.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Returns the mid price, if both sides have liquidity.
    #[must_use]
    pub fn midpoint(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }

    #[must_use]
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            spread: self.spread(),
            midpoint: self.midpoint(),
        }
    }

    /// Returns total bid depth (sum of all bid sizes).
    #[must_use]
    pub fn total_bid_depth(&self) -> Decimal {
        self.bids.iter().map(|l| l.size).sum()
    }

    /// Returns total ask depth (sum of all ask sizes).
    #[must_use]
    pub fn total_ask_depth(&self) -> Decimal {
        self.asks.iter().map(|l| l.size).sum()
    }

    /// Number of resting levels across both sides.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Checks if the order book has any liquidity.
    #[must_use]
    pub fn has_liquidity(&self) -> bool {
        !self.bids.is_empty() || !self.asks.is_empty()
    }

    fn validate(&self, market_id: &str, outcome: Outcome) -> Result<(), BookError> {
        let sides = [(BookSide::Bid, &self.bids), (BookSide::Ask, &self.asks)];
        for (side, levels) in sides {
            for level in levels.iter() {
                if level.price < Decimal::ZERO || level.price > Decimal::ONE {
                    return Err(BookError::PriceOutOfRange {
                        market_id: market_id.to_string(),
                        outcome,
                        side,
                        price: level.price,
                    });
                }
                if level.size < Decimal::ZERO {
                    return Err(BookError::NegativeSize {
                        market_id: market_id.to_string(),
                        outcome,
                        side,
                        size: level.size,
                    });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Market order book
// =============================================================================

/// Full binary book of a single prediction market at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOrderBook {
    /// Provider market identifier.
    pub id: String,
    /// Human-readable market question or title.
    pub label: String,
    pub yes: OutcomeOrderBook,
    pub no: OutcomeOrderBook,
}

impl MarketOrderBook {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        yes: OutcomeOrderBook,
        no: OutcomeOrderBook,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            yes,
            no,
        }
    }

    /// Returns the book for the given outcome.
    #[must_use]
    pub fn outcome(&self, outcome: Outcome) -> &OutcomeOrderBook {
        match outcome {
            Outcome::Yes => &self.yes,
            Outcome::No => &self.no,
        }
    }

    /// Re-sorts both outcome books. Deserialized books should pass through here.
    pub fn normalize(&mut self) {
        self.yes.normalize();
        self.no.normalize();
    }

    /// Rejects prices outside `[0, 1]` and negative sizes.
    ///
    /// # Errors
    ///
    /// Returns the first offending level found, YES book before NO book.
    pub fn validate(&self) -> Result<(), BookError> {
        self.yes.validate(&self.id, Outcome::Yes)?;
        self.no.validate(&self.id, Outcome::No)
    }
}
