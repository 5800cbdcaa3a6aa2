//! The owned pixel buffer.
//!
//! [`PixelBuffer`] is the single image container every operation in the
//! pipeline reads from and writes to.
//!
//! # Memory Layout
//!
//! Pixels are stored interleaved in **row-major** order, top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The buffer is always rectangular and fully populated:
//! `data.len() == width * height * 4`, with both dimensions at least 1.
//!
//! # Ownership
//!
//! A buffer is exclusively owned by whichever pipeline step currently holds
//! it. Operations take a `&PixelBuffer` source and return a brand-new
//! buffer; nothing mutates a source in place. [`map_pixels`] is the
//! allocate-and-transform workhorse for per-pixel operations.
//!
//! [`map_pixels`]: PixelBuffer::map_pixels
//!
//! # Usage
//!
//! ```rust
//! use pixelpipe_core::{PixelBuffer, Rgba};
//!
//! let mut img = PixelBuffer::new(64, 48, Rgba::BLACK).unwrap();
//! img.set(10, 10, Rgba::opaque(255, 0, 0)).unwrap();
//! assert_eq!(img.get(10, 10).unwrap(), Rgba::opaque(255, 0, 0));
//! ```

use crate::{Error, Result, Rgba};

/// Number of channels per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Owned, fully populated RGBA image buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGBA samples, row-major.
    data: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer of the given size with every pixel set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is 0.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelpipe_core::{PixelBuffer, Rgba};
    ///
    /// let img = PixelBuffer::new(320, 240, Rgba::TRANSPARENT).unwrap();
    /// assert_eq!(img.dimensions(), (320, 240));
    /// ```
    pub fn new(width: u32, height: u32, fill: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "both dimensions must be at least 1",
            ));
        }
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&fill.channels());
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer from existing interleaved RGBA data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is 0 or the
    /// data length is not `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "both dimensions must be at least 1",
            ));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the raw interleaved RGBA data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw data.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.pixel(x, y))
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `x >= width` or `y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        self.set_pixel(x, y, pixel);
        Ok(())
    }

    /// Returns the pixel at (x, y) without a bounds check.
    ///
    /// Hot-path accessor for algorithm loops whose indices are already
    /// bounded by the buffer dimensions.
    ///
    /// # Panics
    ///
    /// Debug builds assert that (x, y) is in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        Rgba::new(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    /// Sets the pixel at (x, y) without a bounds check.
    ///
    /// # Panics
    ///
    /// Debug builds assert that (x, y) is in bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&pixel.channels());
    }

    /// Returns a row of pixels as an interleaved byte slice.
    ///
    /// # Panics
    ///
    /// Debug builds assert that `y < height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        let end = start + self.width as usize * CHANNELS;
        &self.data[start..end]
    }

    /// Fills the entire buffer with a pixel value.
    pub fn fill(&mut self, pixel: Rgba) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&pixel.channels());
        }
    }

    /// Iterates over all pixels with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelpipe_core::{PixelBuffer, Rgba};
    ///
    /// let img = PixelBuffer::new(4, 4, Rgba::opaque(9, 9, 9)).unwrap();
    /// for (_x, _y, px) in img.pixels() {
    ///     assert_eq!(px, Rgba::opaque(9, 9, 9));
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel, producing a new buffer of the same
    /// dimensions.
    ///
    /// The source is left untouched; this is the allocation pattern the
    /// per-pixel operations (tone mapping, masking) are built on.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixelpipe_core::{PixelBuffer, Rgba};
    ///
    /// let img = PixelBuffer::new(8, 8, Rgba::opaque(10, 20, 30)).unwrap();
    /// let swapped = img.map_pixels(|px| Rgba::new(px.b, px.g, px.r, px.a));
    /// assert_eq!(swapped.get(0, 0).unwrap(), Rgba::opaque(30, 20, 10));
    /// ```
    pub fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn(Rgba) -> Rgba,
    {
        let mut data = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(CHANNELS) {
            let px = Rgba::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            data.extend_from_slice(&f(px).channels());
        }
        Self {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &CHANNELS)
            .finish()
    }
}
