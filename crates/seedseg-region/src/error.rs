//! Error types for seedseg-region

use thiserror::Error;

/// Errors that can occur during region labeling operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedseg_core::Error),

    /// Similarity threshold is negative, NaN or infinite
    #[error("invalid threshold: {0} (must be finite and >= 0)")]
    InvalidThreshold(f64),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
