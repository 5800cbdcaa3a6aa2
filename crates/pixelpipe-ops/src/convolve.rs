//! The 3x3 convolution engine.
//!
//! A [`Kernel3`] is a fixed 3x3 weight matrix. Applying one computes, for
//! every output pixel and each of R, G and B independently, the weighted sum
//! of the 3x3 neighborhood, normalized by the sum of the kernel weights and
//! offset by a bias.
//!
//! # Border policy
//!
//! Neighbor samples that fall outside the buffer contribute black
//! `(0, 0, 0)`. This is the documented convention of this engine; libraries
//! that extend edge pixels instead will disagree on the one-pixel border.
//!
//! # Alpha
//!
//! Alpha is copied from the center pixel, never convolved.

use crate::{OpsError, OpsResult};
use pixelpipe_core::{PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// A 3x3 convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    weights: [[f32; 3]; 3],
}

impl Kernel3 {
    /// Creates a kernel from a fixed 3x3 weight matrix.
    pub const fn new(weights: [[f32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Creates a kernel from dynamically sized rows, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidMatrix`] unless there are exactly 3 rows
    /// of exactly 3 weights each.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelpipe_ops::Kernel3;
    ///
    /// let rows = vec![vec![0.0, -1.0, 0.0], vec![-1.0, 5.0, -1.0], vec![0.0, -1.0, 0.0]];
    /// assert_eq!(Kernel3::from_rows(&rows).unwrap(), Kernel3::sharpen());
    ///
    /// let bad = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    /// assert!(Kernel3::from_rows(&bad).is_err());
    /// ```
    pub fn from_rows(rows: &[Vec<f32>]) -> OpsResult<Self> {
        if rows.len() != 3 || rows.iter().any(|row| row.len() != 3) {
            return Err(OpsError::InvalidMatrix(
                "kernel must be exactly 3x3".into(),
            ));
        }
        let mut weights = [[0.0f32; 3]; 3];
        for (dst, src) in weights.iter_mut().zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(Self::new(weights))
    }

    /// Returns the weight matrix.
    #[inline]
    pub const fn weights(&self) -> &[[f32; 3]; 3] {
        &self.weights
    }

    /// The normalization divisor: the sum of all nine weights, or 1 when
    /// that sum is 0.
    ///
    /// The zero-sum fallback keeps derivative-style kernels (Sobel,
    /// Laplacian) from dividing by zero; it is a silent normalization
    /// choice, not an error.
    pub fn divisor(&self) -> f32 {
        let sum: f32 = self.weights.iter().flatten().sum();
        if sum == 0.0 { 1.0 } else { sum }
    }

    /// The identity kernel: reproduces the source exactly.
    pub const fn identity() -> Self {
        Self::new([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])
    }

    /// The sharpening kernel.
    pub const fn sharpen() -> Self {
        Self::new([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]])
    }

    /// The posterization kernel: all ones, divisor 9.
    ///
    /// Despite the name this is a 3x3 box blur; the name is kept for parity
    /// with the tool this engine descends from.
    pub const fn posterize() -> Self {
        Self::new([[1.0; 3]; 3])
    }
}

/// Convolves a buffer with a 3x3 kernel.
///
/// For each output pixel and channel:
///
/// ```text
/// out = clamp(round(sum / divisor + bias), 0, 255)
/// ```
///
/// where `sum` weighs the 3x3 neighborhood and `divisor` is
/// [`Kernel3::divisor`]. Out-of-bounds samples read as black; alpha is the
/// center pixel's.
///
/// # Example
///
/// ```rust
/// use pixelpipe_core::{PixelBuffer, Rgba};
/// use pixelpipe_ops::{convolve3, Kernel3};
///
/// let src = PixelBuffer::new(8, 8, Rgba::opaque(100, 100, 100)).unwrap();
/// let out = convolve3(&src, &Kernel3::identity(), 0.0).unwrap();
/// assert_eq!(out, src);
/// ```
pub fn convolve3(src: &PixelBuffer, kernel: &Kernel3, bias: f32) -> OpsResult<PixelBuffer> {
    let divisor = kernel.divisor();
    trace!(
        width = src.width(),
        height = src.height(),
        divisor,
        bias,
        "convolve3"
    );

    let (width, height) = src.dimensions();
    let row_len = width as usize * CHANNELS;
    let mut data = vec![0u8; row_len * height as usize];
    for (y, row) in data.chunks_exact_mut(row_len).enumerate() {
        convolve_row(src, y as u32, kernel, divisor, bias, row);
    }

    Ok(PixelBuffer::from_raw(width, height, data)?)
}

/// Convolves one output row.
///
/// Shared between the serial path above and the rayon path in
/// [`crate::parallel`], so both produce bit-identical output.
pub(crate) fn convolve_row(
    src: &PixelBuffer,
    y: u32,
    kernel: &Kernel3,
    divisor: f32,
    bias: f32,
    row: &mut [u8],
) {
    let (width, height) = src.dimensions();

    for x in 0..width {
        let mut sums = [0.0f32; 3];
        for (ky, kernel_row) in kernel.weights.iter().enumerate() {
            let sy = y as i64 + ky as i64 - 1;
            if sy < 0 || sy >= height as i64 {
                // Black samples contribute nothing to the sums.
                continue;
            }
            for (kx, &weight) in kernel_row.iter().enumerate() {
                let sx = x as i64 + kx as i64 - 1;
                if sx < 0 || sx >= width as i64 {
                    continue;
                }
                let px = src.pixel(sx as u32, sy as u32);
                sums[0] += weight * px.r as f32;
                sums[1] += weight * px.g as f32;
                sums[2] += weight * px.b as f32;
            }
        }

        let center = src.pixel(x, y);
        let out = &mut row[x as usize * CHANNELS..(x as usize + 1) * CHANNELS];
        for (o, sum) in out.iter_mut().zip(sums) {
            *o = (sum / divisor + bias).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = center.a;
    }
}
