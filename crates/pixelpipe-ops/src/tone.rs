//! Sepia tone mapping.
//!
//! The classic fixed-matrix sepia transform. Each output channel is a
//! weighted sum of the source pixel's R, G and B, rounded half-away-from-zero
//! and clamped to [0, 255]; alpha passes through unchanged. The loop runs
//! over the buffer's own dimensions, never externally supplied ones.

use pixelpipe_core::{PixelBuffer, Rgba};
use tracing::debug;

/// Sepia weights applied to (R, G, B) to produce the red channel.
pub const SEPIA_R: [f32; 3] = [0.393, 0.769, 0.189];
/// Sepia weights applied to (R, G, B) to produce the green channel.
pub const SEPIA_G: [f32; 3] = [0.349, 0.686, 0.168];
/// Sepia weights applied to (R, G, B) to produce the blue channel.
pub const SEPIA_B: [f32; 3] = [0.272, 0.534, 0.131];

/// Weighted channel mix, quantized to u8.
#[inline]
fn mix(px: Rgba, weights: [f32; 3]) -> u8 {
    let sum = weights[0] * px.r as f32 + weights[1] * px.g as f32 + weights[2] * px.b as f32;
    sum.round().clamp(0.0, 255.0) as u8
}

/// Applies the sepia transform, producing a new buffer of the same size.
///
/// # Example
///
/// ```rust
/// use pixelpipe_core::{PixelBuffer, Rgba};
/// use pixelpipe_ops::sepia;
///
/// let gray = PixelBuffer::new(2, 2, Rgba::opaque(128, 128, 128)).unwrap();
/// let toned = sepia(&gray);
/// assert_eq!(toned.get(0, 0).unwrap(), Rgba::opaque(173, 154, 120));
/// ```
pub fn sepia(src: &PixelBuffer) -> PixelBuffer {
    debug!(width = src.width(), height = src.height(), "sepia");
    src.map_pixels(|px| {
        Rgba::new(
            mix(px, SEPIA_R),
            mix(px, SEPIA_G),
            mix(px, SEPIA_B),
            px.a,
        )
    })
}
