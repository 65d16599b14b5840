//! Error types for the flightdeck library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flightdeck operations.
///
/// Data-quality problems are never surfaced here: row-level defects are
/// absorbed during normalization and check-level defects become WARN/FAIL
/// results. Only input-shape violations and collaborator-boundary I/O raise.
#[derive(Debug, Error)]
pub enum FlightdeckError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input cannot be interpreted as a tabular structure.
    #[error("Structural error: {0}")]
    Structural(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for flightdeck operations.
pub type Result<T> = std::result::Result<T, FlightdeckError>;
