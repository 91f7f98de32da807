use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// Evaluation itself never fails: an absent opportunity is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Correlation label outside `SAME`/`OPPOSITE`; indicates an upstream bug.
    #[error("unknown correlation type '{0}', expected SAME or OPPOSITE")]
    UnknownCorrelation(String),
}
