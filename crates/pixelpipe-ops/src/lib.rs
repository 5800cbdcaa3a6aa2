//! # pixelpipe-ops
//!
//! Pixel operations for the pixelpipe image-editing pipeline.
//!
//! Every operation reads an immutable [`PixelBuffer`](pixelpipe_core::PixelBuffer)
//! source and produces a brand-new output buffer; nothing is mutated in
//! place.
//!
//! # Modules
//!
//! - [`resample`] - area-average (box filter) resizing
//! - [`tone`] - the sepia color transform
//! - [`mask`] - corner-sampled background removal
//! - [`convolve`] - the 3x3 convolution engine and its named presets
//!
//! # Example
//!
//! ```rust
//! use pixelpipe_core::{PixelBuffer, Rgba};
//! use pixelpipe_ops::{convolve3, resample, Kernel3};
//!
//! let src = PixelBuffer::new(64, 64, Rgba::opaque(128, 128, 128)).unwrap();
//! let small = resample(&src, 16, 16).unwrap();
//! let sharpened = convolve3(&small, &Kernel3::sharpen(), 0.0).unwrap();
//! assert_eq!(sharpened.dimensions(), (16, 16));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convolve;
pub mod mask;
pub mod resample;
pub mod tone;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use convolve::{convolve3, Kernel3};
pub use error::{OpsError, OpsResult};
pub use mask::{remove_background, DEFAULT_BACKGROUND_THRESHOLD};
pub use resample::resample;
pub use tone::sepia;
