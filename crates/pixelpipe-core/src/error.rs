//! Error types for pixelpipe-core operations.
//!
//! The [`Error`] enum covers the failure modes of the core types: pixel
//! access outside the buffer, rejected buffer dimensions, and file formats
//! outside the supported set. The operation and pipeline crates wrap this
//! type with `#[from]` rather than redefining the variants.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the core buffer and format types.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// Returned when accessing a pixel at (x, y) where `x >= width` or
    /// `y >= height`.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or when raw data does not
    /// match the dimensions it claims to describe.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// File format outside the supported set.
    ///
    /// The supported set is exactly `bmp`, `gif`, `jpg`/`jpeg`, `png`,
    /// `webp`; `jpg` is canonicalized to `jpeg` before comparison.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat(format.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}
