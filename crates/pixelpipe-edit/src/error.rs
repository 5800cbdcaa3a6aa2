//! Error types for the editing pipeline.

use crate::traits::BoxError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors surfaced by [`Editor`](crate::Editor) operations.
///
/// Every error is returned immediately at the failing step; nothing is
/// retried or recovered internally, and a failed operation leaves the
/// editor's buffer unchanged.
#[derive(Debug, Error)]
pub enum EditError {
    /// A pixel operation was invoked before a successful load.
    #[error("no image loaded")]
    NoImageLoaded,

    /// The decoder collaborator failed.
    #[error("decode failed: {0}")]
    Decode(#[source] BoxError),

    /// The encoder collaborator failed.
    #[error("encode failed: {0}")]
    Encode(#[source] BoxError),

    /// The filter-library collaborator failed.
    #[error("filter failed: {0}")]
    Filter(#[source] BoxError),

    /// A numeric filter parameter is outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the core buffer and format types.
    #[error(transparent)]
    Core(#[from] pixelpipe_core::Error),

    /// Error from a pixel operation.
    #[error(transparent)]
    Ops(#[from] pixelpipe_ops::OpsError),
}

impl EditError {
    /// Creates an [`EditError::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
