//! Error types for artboard operations.

use thiserror::Error;

/// Result type for artboard operations.
pub type ArtboardResult<T> = Result<T, ArtboardError>;

/// Errors that can occur in artboard operations.
///
/// Only API-level lookup failures surface as errors; degenerate geometry
/// and invalid character ranges are normalized in place and never error.
#[derive(Debug, Error)]
pub enum ArtboardError {
    /// Layer not found on the artboard.
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    /// Guide not found on the artboard.
    #[error("Guide not found: {0}")]
    GuideNotFound(String),

    /// Invalid operation on a layer (wrong kind, locked, or mid-gesture).
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
