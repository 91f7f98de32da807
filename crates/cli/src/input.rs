//! Order book input files.
//!
//! Books are validated before normalization: normalization drops non-positive
//! sizes, which would otherwise hide negative sizes from validation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use depth_arb_core::MarketOrderBook;
use depth_arb_engine::CorrelationType;
use serde::Deserialize;

/// Parses, validates and normalizes a single market order book.
pub fn parse_market(json: &str) -> Result<MarketOrderBook> {
    let market: MarketOrderBook =
        serde_json::from_str(json).context("Failed to parse market order book")?;
    prepare(market)
}

pub fn load_market(path: &Path) -> Result<MarketOrderBook> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_market(&json).with_context(|| format!("Invalid order book in {}", path.display()))
}

fn prepare(mut market: MarketOrderBook) -> Result<MarketOrderBook> {
    market.validate()?;
    market.normalize();
    Ok(market)
}

/// Batch scan input: a set of markets and the pairs to evaluate between them.
#[derive(Debug, Deserialize)]
pub struct ScanInput {
    pub markets: Vec<MarketOrderBook>,
    pub pairs: Vec<PairRef>,
}

/// A pair as written in the input file, referencing markets by id.
#[derive(Debug, Deserialize)]
pub struct PairRef {
    pub market1: String,
    pub market2: String,
    pub correlation: String,
}

/// A pair ready for evaluation.
#[derive(Debug, Clone)]
pub struct ResolvedPair {
    pub market1: Arc<MarketOrderBook>,
    pub market2: Arc<MarketOrderBook>,
    pub correlation: CorrelationType,
}

impl ScanInput {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scan input")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&json).with_context(|| format!("Invalid scan input in {}", path.display()))
    }

    /// Validates every market and binds each pair to its books.
    ///
    /// Fails on the first invalid book, duplicate market id, unknown market id
    /// or unknown correlation, before anything is evaluated.
    pub fn resolve(self) -> Result<Vec<ResolvedPair>> {
        let mut markets: HashMap<String, Arc<MarketOrderBook>> = HashMap::new();
        for market in self.markets {
            let market = prepare(market)?;
            if markets.contains_key(&market.id) {
                bail!("Duplicate market id: {}", market.id);
            }
            markets.insert(market.id.clone(), Arc::new(market));
        }

        self.pairs
            .into_iter()
            .enumerate()
            .map(|(index, pair)| -> Result<ResolvedPair> {
                let lookup = |id: &str| {
                    markets
                        .get(id)
                        .cloned()
                        .with_context(|| format!("Pair {index}: unknown market id {id}"))
                };
                Ok(ResolvedPair {
                    market1: lookup(&pair.market1)?,
                    market2: lookup(&pair.market2)?,
                    correlation: pair
                        .correlation
                        .parse()
                        .with_context(|| format!("Pair {index}: invalid correlation"))?,
                })
            })
            .collect()
    }
}
