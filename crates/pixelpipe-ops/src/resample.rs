//! Area-average (box filter) resizing.
//!
//! Each destination pixel maps to a rectangle in source space; its color is
//! the area-weighted average of every source sample the rectangle covers.
//! This reproduces smooth box-filter minification/magnification rather than
//! nearest-neighbor sampling. Alpha is resampled exactly like the color
//! channels, independently and without premultiplication.
//!
//! # Example
//!
//! ```rust
//! use pixelpipe_core::{PixelBuffer, Rgba};
//! use pixelpipe_ops::resample;
//!
//! let src = PixelBuffer::new(64, 64, Rgba::opaque(10, 20, 30)).unwrap();
//! let dst = resample(&src, 32, 48).unwrap();
//! assert_eq!(dst.dimensions(), (32, 48));
//! ```

use crate::{OpsError, OpsResult};
use pixelpipe_core::{PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Resizes a buffer to the target dimensions with an area-average filter.
///
/// Aspect ratio is not enforced; callers that care about distortion must
/// pick proportional targets themselves.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] unless both targets are >= 1.
pub fn resample(src: &PixelBuffer, target_w: u32, target_h: u32) -> OpsResult<PixelBuffer> {
    if target_w == 0 || target_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "target size must be at least 1x1".into(),
        ));
    }
    trace!(
        src_w = src.width(),
        src_h = src.height(),
        target_w,
        target_h,
        "resample"
    );

    let ratio_x = src.width() as f64 / target_w as f64;
    let ratio_y = src.height() as f64 / target_h as f64;

    let row_len = target_w as usize * CHANNELS;
    let mut data = vec![0u8; row_len * target_h as usize];
    for (dy, row) in data.chunks_exact_mut(row_len).enumerate() {
        resample_row(src, dy as u32, target_w, ratio_x, ratio_y, row);
    }

    Ok(PixelBuffer::from_raw(target_w, target_h, data)?)
}

/// Fills one destination row with area-averaged samples.
///
/// Shared between the serial path above and the rayon path in
/// [`crate::parallel`], so both produce bit-identical output.
pub(crate) fn resample_row(
    src: &PixelBuffer,
    dy: u32,
    target_w: u32,
    ratio_x: f64,
    ratio_y: f64,
    row: &mut [u8],
) {
    let (src_w, src_h) = src.dimensions();

    // Source-space rows covered by this destination row.
    let y0 = dy as f64 * ratio_y;
    let y1 = (dy as f64 + 1.0) * ratio_y;
    let sy0 = y0.floor() as u32;
    let sy1 = (y1.ceil() as u32).min(src_h);

    for dx in 0..target_w {
        let x0 = dx as f64 * ratio_x;
        let x1 = (dx as f64 + 1.0) * ratio_x;
        let sx0 = x0.floor() as u32;
        let sx1 = (x1.ceil() as u32).min(src_w);

        let mut acc = [0.0f64; CHANNELS];
        let mut area = 0.0f64;

        for sy in sy0..sy1 {
            // Overlap of the sample's unit row with [y0, y1).
            let wy = (y1.min((sy + 1) as f64) - y0.max(sy as f64)).max(0.0);
            if wy == 0.0 {
                continue;
            }
            for sx in sx0..sx1 {
                let wx = (x1.min((sx + 1) as f64) - x0.max(sx as f64)).max(0.0);
                if wx == 0.0 {
                    continue;
                }
                let weight = wx * wy;
                let channels = src.pixel(sx, sy).channels();
                for (a, c) in acc.iter_mut().zip(channels) {
                    *a += weight * c as f64;
                }
                area += weight;
            }
        }

        let out = &mut row[dx as usize * CHANNELS..(dx as usize + 1) * CHANNELS];
        if area > 0.0 {
            for (o, a) in out.iter_mut().zip(acc) {
                *o = (a / area).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
