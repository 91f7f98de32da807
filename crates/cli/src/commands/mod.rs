//! CLI commands for arbitrage evaluation.

pub mod evaluate;
pub mod scan;

pub use evaluate::{run_evaluate, EvaluateArgs};
pub use scan::{run_scan, ScanArgs};
