//! Collaborator traits for decoding, encoding and the external filter
//! library.
//!
//! The pipeline manipulates decoded pixel data only; byte-level I/O and the
//! opaque numeric filters live behind these traits. Implementations are
//! assumed deterministic for a given input.

use crate::filters::FilterOp;
use pixelpipe_core::{ImageFormat, PixelBuffer};
use std::path::Path;

/// Boxed error type collaborators report failures with.
///
/// The pipeline wraps these as
/// [`EditError::Decode`](crate::EditError::Decode) /
/// [`Encode`](crate::EditError::Encode) / [`Filter`](crate::EditError::Filter).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Decodes an image file into a pixel buffer.
///
/// Implementations must deliver straight-alpha RGBA on the 0-255 scale;
/// source formats with other alpha conventions are converted here, before
/// the buffer enters the pipeline.
pub trait Decode {
    /// Decodes the file at `path`, returning the buffer and the detected
    /// format.
    fn decode(&self, path: &Path) -> Result<(PixelBuffer, ImageFormat), BoxError>;
}

/// Encodes a pixel buffer to a file.
pub trait Encode {
    /// Encodes `buffer` as `format` into the file at `path`.
    fn encode(&self, buffer: &PixelBuffer, format: ImageFormat, path: &Path)
        -> Result<(), BoxError>;
}

/// The external numeric-filter library.
///
/// All simple per-pixel adjustments (brightness, negative, blurs, ...) are
/// delegated here wholesale; the pipeline only validates parameters and
/// threads the buffer through.
pub trait FilterBackend {
    /// Applies `filter` to `buffer`, returning a new buffer.
    fn apply_filter(&self, buffer: &PixelBuffer, filter: &FilterOp)
        -> Result<PixelBuffer, BoxError>;
}

impl<T: FilterBackend + ?Sized> FilterBackend for &T {
    fn apply_filter(
        &self,
        buffer: &PixelBuffer,
        filter: &FilterOp,
    ) -> Result<PixelBuffer, BoxError> {
        (**self).apply_filter(buffer, filter)
    }
}
