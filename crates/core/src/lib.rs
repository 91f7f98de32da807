pub mod book;
pub mod config;
pub mod config_loader;
pub mod error;

pub use book::{BookSide, MarketOrderBook, OrderBookLevel, Outcome, OutcomeOrderBook, TopOfBook};
pub use config::{AppConfig, EngineConfig, ScannerConfig};
pub use config_loader::ConfigLoader;
pub use error::BookError;
