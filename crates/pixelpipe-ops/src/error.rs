//! Error types for pixel operations.

use thiserror::Error;

/// Error type for pixel operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Convolution matrix is not exactly 3x3.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Error from the core buffer types.
    #[error(transparent)]
    Core(#[from] pixelpipe_core::Error),
}

/// Result type for pixel operations.
pub type OpsResult<T> = Result<T, OpsError>;
