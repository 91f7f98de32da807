use serde::{Deserialize, Serialize};

/// Reference trade size used to rank candidate legs.
pub const DEFAULT_SMALL_REFERENCE_SIZE: u64 = 100;
/// Second reference size reported alongside the small one.
pub const DEFAULT_LARGE_REFERENCE_SIZE: u64 = 1000;
/// Hard cap on the maximum-profitable-size search.
pub const DEFAULT_MAX_SEARCH_SIZE: u64 = 100_000;
/// Evenly spaced samples on the profit curve.
pub const DEFAULT_CURVE_SAMPLES: u64 = 20;
/// Sizes always present on the profit curve when they fit under the max size.
pub const DEFAULT_CURVE_CHECKPOINTS: [u64; 5] = [10, 50, 100, 500, 1000];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub scanner: ScannerConfig,
}

/// Sizing constants for the arbitrage engine.
///
/// The defaults reproduce the fixed behaviour of the engine; overriding them
/// changes the ranking sizes, the search cap and the curve sampling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub small_reference_size: u64,
    pub large_reference_size: u64,
    pub max_search_size: u64,
    pub curve_samples: u64,
    pub curve_checkpoints: Vec<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            small_reference_size: DEFAULT_SMALL_REFERENCE_SIZE,
            large_reference_size: DEFAULT_LARGE_REFERENCE_SIZE,
            max_search_size: DEFAULT_MAX_SEARCH_SIZE,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            curve_checkpoints: DEFAULT_CURVE_CHECKPOINTS.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Sets the search cap.
    #[must_use]
    pub fn with_max_search_size(mut self, size: u64) -> Self {
        self.max_search_size = size;
        self
    }

    /// Sets the number of evenly spaced curve samples.
    #[must_use]
    pub fn with_curve_samples(mut self, samples: u64) -> Self {
        self.curve_samples = samples;
        self
    }
}

/// Concurrency policy for batch scans over many market pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Maximum pair evaluations in flight.
    pub max_concurrency: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self { max_concurrency: 8 }
    }
}
