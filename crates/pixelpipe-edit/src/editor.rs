//! The editing pipeline state machine.
//!
//! An [`Editor`] is empty until a load succeeds, then carries exactly one
//! owned [`PixelBuffer`] through the chained operations. Each operation
//! validates its inputs fully and only then replaces the buffer, so a failed
//! step leaves the editor unchanged and the chain short-circuits on the
//! first error:
//!
//! ```rust,ignore
//! editor.load(&decoder, "in.jpg")?.resize(800, 600)?.sepia()?;
//! ```
//!
//! # Dimensions and formats
//!
//! The load-time dimensions are captured once and never change; the target
//! dimensions follow the most recent resize. The pixel operations
//! themselves always work from the buffer's own reported dimensions, so the
//! metadata cannot desynchronize them. The save format is the selected
//! target format, falling back to the source format detected at load.

use crate::filters::FilterOp;
use crate::traits::{Decode, Encode, FilterBackend};
use crate::{EditError, EditResult};
use pixelpipe_core::{ImageFormat, PixelBuffer};
use pixelpipe_ops::Kernel3;
use std::path::Path;
use tracing::debug;

/// The image-editing pipeline.
///
/// Generic over the external filter library `F`, which is fixed at
/// construction; decoding and encoding collaborators are passed to
/// [`load`](Editor::load) and [`save`](Editor::save) directly.
pub struct Editor<F> {
    filters: F,
    buffer: Option<PixelBuffer>,
    source_format: Option<ImageFormat>,
    target_format: Option<ImageFormat>,
    initial_size: Option<(u32, u32)>,
    target_size: Option<(u32, u32)>,
}

impl<F: FilterBackend> Editor<F> {
    /// Creates an empty editor around a filter backend.
    pub fn new(filters: F) -> Self {
        Self {
            filters,
            buffer: None,
            source_format: None,
            target_format: None,
            initial_size: None,
            target_size: None,
        }
    }

    /// Loads an image through the decoder collaborator.
    ///
    /// The file extension is checked against the supported format set
    /// (with `jpg` canonicalized to `jpeg`) before the decoder runs, so an
    /// unsupported path fails fast without touching the file.
    ///
    /// # Errors
    ///
    /// [`UnsupportedFormat`](pixelpipe_core::Error::UnsupportedFormat) for
    /// extensions outside the set, [`EditError::Decode`] when the decoder
    /// fails.
    pub fn load<D: Decode>(
        &mut self,
        decoder: &D,
        path: impl AsRef<Path>,
    ) -> EditResult<&mut Self> {
        let path = path.as_ref();
        ImageFormat::from_path(path)?;
        let (buffer, format) = decoder.decode(path).map_err(EditError::Decode)?;
        debug!(
            path = %path.display(),
            format = %format,
            width = buffer.width(),
            height = buffer.height(),
            "loaded image"
        );
        Ok(self.load_buffer(buffer, format))
    }

    /// Adopts an already-decoded buffer as the loaded image.
    ///
    /// Entry point for callers that decode elsewhere; the pipeline is not a
    /// codec. Resets all per-image state exactly like a file load.
    pub fn load_buffer(&mut self, buffer: PixelBuffer, format: ImageFormat) -> &mut Self {
        let size = buffer.dimensions();
        self.buffer = Some(buffer);
        self.source_format = Some(format);
        self.target_format = None;
        self.initial_size = Some(size);
        self.target_size = Some(size);
        self
    }

    /// The current buffer, or `NoImageLoaded`.
    fn current(&self) -> EditResult<&PixelBuffer> {
        self.buffer.as_ref().ok_or(EditError::NoImageLoaded)
    }

    /// Resizes the image with the area-average resampler.
    ///
    /// The buffer's true current dimensions are the resample source size,
    /// so repeated resizes compose without distortion. Aspect ratio is not
    /// enforced.
    ///
    /// # Errors
    ///
    /// [`InvalidDimensions`](pixelpipe_ops::OpsError::InvalidDimensions)
    /// unless both targets are >= 1.
    pub fn resize(&mut self, width: u32, height: u32) -> EditResult<&mut Self> {
        let resized = pixelpipe_ops::resample(self.current()?, width, height)?;
        debug!(width, height, "resized");
        self.target_size = Some((width, height));
        self.buffer = Some(resized);
        Ok(self)
    }

    /// Selects the save format by name.
    ///
    /// Accepts any supported name or extension, case-insensitively, with
    /// `jpg` canonicalized to `jpeg`.
    ///
    /// # Errors
    ///
    /// [`UnsupportedFormat`](pixelpipe_core::Error::UnsupportedFormat) for
    /// names outside the set.
    pub fn select_format(&mut self, name: &str) -> EditResult<&mut Self> {
        let format = ImageFormat::parse(name)?;
        self.target_format = Some(format);
        Ok(self)
    }

    /// Applies the sepia tone transform.
    pub fn sepia(&mut self) -> EditResult<&mut Self> {
        let toned = pixelpipe_ops::sepia(self.current()?);
        self.buffer = Some(toned);
        Ok(self)
    }

    /// Masks background-colored pixels to full transparency.
    ///
    /// The background color is estimated from the four corner pixels; see
    /// [`pixelpipe_ops::remove_background`]. A useful starting tolerance is
    /// [`DEFAULT_BACKGROUND_THRESHOLD`](pixelpipe_ops::DEFAULT_BACKGROUND_THRESHOLD).
    ///
    /// When the effective save format cannot carry alpha, the source format
    /// is retargeted to PNG so the transparency survives an unchanged save.
    pub fn remove_background(&mut self, threshold: u8) -> EditResult<&mut Self> {
        let masked = pixelpipe_ops::remove_background(self.current()?, threshold);
        self.buffer = Some(masked);

        let effective = self.target_format.or(self.source_format);
        if !effective.is_some_and(ImageFormat::supports_alpha) {
            debug!("retargeting source format to png to preserve alpha");
            self.source_format = Some(ImageFormat::Png);
        }
        Ok(self)
    }

    /// Convolves the image with a 3x3 kernel (bias 0).
    pub fn convolve(&mut self, kernel: Kernel3) -> EditResult<&mut Self> {
        let out = pixelpipe_ops::convolve3(self.current()?, &kernel, 0.0)?;
        self.buffer = Some(out);
        Ok(self)
    }

    /// Convolves with a caller-supplied matrix.
    ///
    /// # Errors
    ///
    /// [`InvalidMatrix`](pixelpipe_ops::OpsError::InvalidMatrix) unless the
    /// matrix is exactly 3x3; the shape is checked before the loaded-image
    /// check, and a failure leaves the buffer untouched.
    pub fn custom_convolution(&mut self, matrix: &[Vec<f32>]) -> EditResult<&mut Self> {
        let kernel = Kernel3::from_rows(matrix)?;
        self.convolve(kernel)
    }

    /// Sharpens the image ([`Kernel3::sharpen`]).
    pub fn sharpen(&mut self) -> EditResult<&mut Self> {
        self.convolve(Kernel3::sharpen())
    }

    /// Applies the posterization kernel ([`Kernel3::posterize`]).
    pub fn posterize(&mut self) -> EditResult<&mut Self> {
        self.convolve(Kernel3::posterize())
    }

    /// Validates a delegated filter and threads the buffer through the
    /// backend.
    fn apply_external(&mut self, op: FilterOp) -> EditResult<&mut Self> {
        op.validate()?;
        let src = self.current()?;
        debug!(filter = op.name(), "delegating to filter backend");
        let out = self
            .filters
            .apply_filter(src, &op)
            .map_err(EditError::Filter)?;
        self.buffer = Some(out);
        Ok(self)
    }

    /// Inverts every color channel.
    pub fn negative(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Negative)
    }

    /// Converts the image to grayscale.
    pub fn grayscale(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Grayscale)
    }

    /// Adjusts brightness; `value` must be within [-255, 255].
    pub fn adjust_brightness(&mut self, value: i32) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Brightness(value))
    }

    /// Adjusts contrast; `value` must be within [-255, 255].
    pub fn adjust_contrast(&mut self, value: i32) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Contrast(value))
    }

    /// Blends a color over the image; all channels within [0, 255].
    pub fn color_overlay(
        &mut self,
        red: i32,
        green: i32,
        blue: i32,
        alpha: i32,
    ) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::ColorOverlay {
            red,
            green,
            blue,
            alpha,
        })
    }

    /// Highlights edges.
    pub fn edge_detection(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::EdgeDetect)
    }

    /// Applies an emboss relief effect.
    pub fn emboss(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Emboss)
    }

    /// Applies a Gaussian blur.
    pub fn gaussian_blur(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::GaussianBlur)
    }

    /// Applies an edge-preserving blur.
    pub fn selective_blur(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::SelectiveBlur)
    }

    /// Applies the mean-removal sketch effect.
    pub fn sketch(&mut self) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Sketch)
    }

    /// Smooths the image with the given weight.
    pub fn smooth(&mut self, weight: i32) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Smooth(weight))
    }

    /// Mosaics the image into `block_size` squares.
    pub fn pixelate(&mut self, block_size: u32, advanced: bool) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Pixelate {
            block_size,
            advanced,
        })
    }

    /// Randomly displaces pixels; `subtraction` must be strictly below
    /// `addition`.
    pub fn scatter(&mut self, subtraction: u32, addition: u32) -> EditResult<&mut Self> {
        self.apply_external(FilterOp::Scatter {
            subtraction,
            addition,
        })
    }

    /// Saves the image through the encoder collaborator.
    ///
    /// The effective format is the selected target format, falling back to
    /// the source format detected at load.
    ///
    /// # Errors
    ///
    /// [`EditError::NoImageLoaded`] without a buffer, [`EditError::Encode`]
    /// when the encoder fails.
    pub fn save<E: Encode>(&self, encoder: &E, path: impl AsRef<Path>) -> EditResult<()> {
        let buffer = self.current()?;
        let format = self
            .target_format
            .or(self.source_format)
            .ok_or(EditError::NoImageLoaded)?;
        let path = path.as_ref();
        debug!(path = %path.display(), format = %format, "saving image");
        encoder
            .encode(buffer, format, path)
            .map_err(EditError::Encode)
    }

    /// The current buffer, if an image is loaded.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// The current buffer's dimensions, if an image is loaded.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.buffer.as_ref().map(PixelBuffer::dimensions)
    }

    /// The format detected at load time.
    pub fn source_format(&self) -> Option<ImageFormat> {
        self.source_format
    }

    /// The format selected for saving, if any.
    pub fn target_format(&self) -> Option<ImageFormat> {
        self.target_format
    }

    /// The dimensions captured at load time.
    pub fn initial_size(&self) -> Option<(u32, u32)> {
        self.initial_size
    }

    /// The dimensions of the most recent resize (load dimensions before
    /// any resize).
    pub fn target_size(&self) -> Option<(u32, u32)> {
        self.target_size
    }
}

impl<F> std::fmt::Debug for Editor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("buffer", &self.buffer)
            .field("source_format", &self.source_format)
            .field("target_format", &self.target_format)
            .field("initial_size", &self.initial_size)
            .field("target_size", &self.target_size)
            .finish()
    }
}
