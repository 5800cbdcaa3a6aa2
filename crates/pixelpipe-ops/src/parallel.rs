//! Parallel pixel operations using Rayon.
//!
//! Rayon-parallel variants of the resampler and the convolution engine.
//! Both distribute whole destination rows over worker threads and reuse the
//! serial row kernels, so their output is bit-identical to the serial
//! functions — parallelism here is a pure optimization.
//!
//! # Example
//!
//! ```rust
//! use pixelpipe_core::{PixelBuffer, Rgba};
//! use pixelpipe_ops::parallel;
//!
//! let src = PixelBuffer::new(256, 256, Rgba::opaque(128, 64, 32)).unwrap();
//! let half = parallel::resample(&src, 128, 128).unwrap();
//! assert_eq!(half.dimensions(), (128, 128));
//! ```

use crate::convolve::{convolve_row, Kernel3};
use crate::resample::resample_row;
use crate::{OpsError, OpsResult};
use pixelpipe_core::{PixelBuffer, CHANNELS};
use rayon::prelude::*;

/// Parallel area-average resize.
///
/// Same contract and output as [`crate::resample`].
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

    let ratio_x = src.width() as f64 / target_w as f64;
    let ratio_y = src.height() as f64 / target_h as f64;

    let row_len = target_w as usize * CHANNELS;
    let mut data = vec![0u8; row_len * target_h as usize];
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(dy, row)| {
            resample_row(src, dy as u32, target_w, ratio_x, ratio_y, row);
        });

    Ok(PixelBuffer::from_raw(target_w, target_h, data)?)
}

/// Parallel 3x3 convolution.
///
/// Same contract and output as [`crate::convolve3`].
pub fn convolve3(src: &PixelBuffer, kernel: &Kernel3, bias: f32) -> OpsResult<PixelBuffer> {
    let divisor = kernel.divisor();

    let (width, height) = src.dimensions();
    let row_len = width as usize * CHANNELS;
    let mut data = vec![0u8; row_len * height as usize];
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            convolve_row(src, y as u32, kernel, divisor, bias, row);
        });

    Ok(PixelBuffer::from_raw(width, height, data)?)
}
