//! Corner-sampled background removal.
//!
//! Estimates the background color as the per-channel arithmetic mean of the
//! four corner pixels, then masks every pixel within a per-channel tolerance
//! of that estimate to fully transparent. The tolerance is applied to each
//! channel independently with a strict less-than comparison; there is no
//! combined distance metric, and a channel diff exactly equal to the
//! threshold keeps the pixel.
//!
//! The output needs an alpha-capable target format to survive encoding;
//! recording that requirement is the pipeline's job, not this module's.

use pixelpipe_core::{PixelBuffer, Rgba};
use tracing::debug;

/// Default masking tolerance.
pub const DEFAULT_BACKGROUND_THRESHOLD: u8 = 30;

/// Per-channel mean of the four corner pixels; corner alpha is ignored.
fn corner_average(src: &PixelBuffer) -> [f32; 3] {
    let (w, h) = src.dimensions();
    let corners = [
        src.pixel(0, 0),
        src.pixel(w - 1, 0),
        src.pixel(0, h - 1),
        src.pixel(w - 1, h - 1),
    ];
    let mut avg = [0.0f32; 3];
    for px in corners {
        avg[0] += px.r as f32;
        avg[1] += px.g as f32;
        avg[2] += px.b as f32;
    }
    for channel in &mut avg {
        *channel /= 4.0;
    }
    avg
}

/// Masks background-colored pixels to [`Rgba::TRANSPARENT`].
///
/// Pixels outside the tolerance are copied verbatim, including their own
/// alpha. On a uniform buffer every pixel is within any positive tolerance
/// of the corner average, so the whole output is transparent.
///
/// # Example
///
/// ```rust
/// use pixelpipe_core::{PixelBuffer, Rgba};
/// use pixelpipe_ops::{remove_background, DEFAULT_BACKGROUND_THRESHOLD};
///
/// let flat = PixelBuffer::new(4, 4, Rgba::opaque(240, 240, 240)).unwrap();
/// let cut = remove_background(&flat, DEFAULT_BACKGROUND_THRESHOLD);
/// assert!(cut.pixels().all(|(_, _, px)| px.is_transparent()));
/// ```
pub fn remove_background(src: &PixelBuffer, threshold: u8) -> PixelBuffer {
    let avg = corner_average(src);
    let tolerance = threshold as f32;
    debug!(
        width = src.width(),
        height = src.height(),
        threshold,
        avg_r = avg[0],
        avg_g = avg[1],
        avg_b = avg[2],
        "remove_background"
    );

    src.map_pixels(|px| {
        let background = (px.r as f32 - avg[0]).abs() < tolerance
            && (px.g as f32 - avg[1]).abs() < tolerance
            && (px.b as f32 - avg[2]).abs() < tolerance;
        if background { Rgba::TRANSPARENT } else { px }
    })
}
