use rust_decimal::Decimal;
use thiserror::Error;

use crate::book::{BookSide, Outcome};

/// Malformed order book input rejected before evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("market {market_id}: {outcome} {side} price {price} outside [0, 1]")]
    PriceOutOfRange {
        market_id: String,
        outcome: Outcome,
        side: BookSide,
        price: Decimal,
    },

    #[error("market {market_id}: {outcome} {side} size {size} is negative")]
    NegativeSize {
        market_id: String,
        outcome: Outcome,
        side: BookSide,
        size: Decimal,
    },
}
