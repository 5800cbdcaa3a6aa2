//! Supported file formats.
//!
//! The pipeline recognizes a closed set of formats; everything else is
//! rejected up front. `jpg` and `jpeg` are the same format and are
//! canonicalized in exactly one place ([`ImageFormat::parse`]), which every
//! entry point (load-time extension checks, format selection, save) goes
//! through.

use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The closed set of file formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Windows bitmap.
    Bmp,
    /// GIF.
    Gif,
    /// JPEG (`jpg` and `jpeg` extensions).
    Jpeg,
    /// PNG.
    Png,
    /// WebP.
    WebP,
}

impl ImageFormat {
    /// All supported formats.
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Bmp,
        ImageFormat::Gif,
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::WebP,
    ];

    /// Parses a format name or extension, case-insensitively.
    ///
    /// This is the single canonicalization point: `jpg` maps to
    /// [`ImageFormat::Jpeg`] here and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for names outside the set.
    ///
    /// # Example
    ///
    /// ```
    /// use pixelpipe_core::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::parse("jpg").unwrap(), ImageFormat::Jpeg);
    /// assert_eq!(ImageFormat::parse("PNG").unwrap(), ImageFormat::Png);
    /// assert!(ImageFormat::parse("tiff").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "bmp" => Ok(ImageFormat::Bmp),
            "gif" => Ok(ImageFormat::Gif),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::WebP),
            _ => Err(Error::unsupported_format(name)),
        }
    }

    /// Derives the format from a file path's extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] when the extension is missing
    /// or outside the set.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::unsupported_format(path.display().to_string()))?;
        Self::parse(ext)
    }

    /// Returns the canonical lowercase extension (`"jpeg"` for JPEG).
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
        }
    }

    /// Returns `true` if the format can store an alpha channel.
    ///
    /// Background removal needs one of these as the effective save format,
    /// otherwise the transparency it produced would be flattened at encode
    /// time.
    pub const fn supports_alpha(self) -> bool {
        match self {
            ImageFormat::Gif | ImageFormat::Png | ImageFormat::WebP => true,
            ImageFormat::Bmp | ImageFormat::Jpeg => false,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
