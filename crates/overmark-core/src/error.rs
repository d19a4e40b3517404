//! Engine errors.

use thiserror::Error;

/// Errors surfaced by the engine's public entry points.
///
/// Gesture handling itself never fails; these cover misuse of the
/// request/response capabilities and host-supplied data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("A color sample is already in progress")]
    ColorSampleInProgress,
    #[error("No color sample is pending")]
    NoColorSamplePending,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
