//! The enumerated operations of the external filter library.
//!
//! Each variant names one delegated filter together with its parameters.
//! The pipeline validates parameter ranges here before anything reaches the
//! [`FilterBackend`](crate::FilterBackend); the backend itself carries no
//! further pixel-level contract.

use crate::{EditError, EditResult};

/// One operation of the external filter library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Invert every color channel.
    Negative,
    /// Convert to grayscale.
    Grayscale,
    /// Shift brightness by the given amount, in [-255, 255].
    Brightness(i32),
    /// Shift contrast by the given amount, in [-255, 255].
    Contrast(i32),
    /// Blend a color over the image; all channels in [0, 255].
    ColorOverlay {
        /// Red component of the overlay color.
        red: i32,
        /// Green component of the overlay color.
        green: i32,
        /// Blue component of the overlay color.
        blue: i32,
        /// Alpha of the overlay color.
        alpha: i32,
    },
    /// Highlight edges.
    EdgeDetect,
    /// Emboss relief effect.
    Emboss,
    /// Gaussian blur.
    GaussianBlur,
    /// Blur that preserves strong edges.
    SelectiveBlur,
    /// Mean-removal sketch effect.
    Sketch,
    /// Smoothing with the given weight.
    Smooth(i32),
    /// Mosaic into square blocks.
    Pixelate {
        /// Block edge length in pixels.
        block_size: u32,
        /// Use the averaged-block variant.
        advanced: bool,
    },
    /// Random pixel displacement.
    Scatter {
        /// Lower displacement bound; must be strictly below `addition`.
        subtraction: u32,
        /// Upper displacement bound.
        addition: u32,
    },
}

impl FilterOp {
    /// Validates the operation's parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidParameter`] when:
    /// - brightness or contrast is outside [-255, 255],
    /// - any overlay channel is outside [0, 255],
    /// - scatter's subtraction level is not strictly below its addition
    ///   level.
    pub fn validate(&self) -> EditResult<()> {
        match *self {
            FilterOp::Brightness(v) if !(-255..=255).contains(&v) => Err(
                EditError::invalid_parameter("brightness must be between -255 and 255"),
            ),
            FilterOp::Contrast(v) if !(-255..=255).contains(&v) => Err(
                EditError::invalid_parameter("contrast must be between -255 and 255"),
            ),
            FilterOp::ColorOverlay {
                red,
                green,
                blue,
                alpha,
            } => {
                for (name, value) in [
                    ("red", red),
                    ("green", green),
                    ("blue", blue),
                    ("alpha", alpha),
                ] {
                    if !(0..=255).contains(&value) {
                        return Err(EditError::invalid_parameter(format!(
                            "{name} value must be between 0 and 255"
                        )));
                    }
                }
                Ok(())
            }
            FilterOp::Scatter {
                subtraction,
                addition,
            } if subtraction >= addition => Err(EditError::invalid_parameter(
                "scatter subtraction level must be below the addition level",
            )),
            _ => Ok(()),
        }
    }

    /// A stable lowercase label, used for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            FilterOp::Negative => "negative",
            FilterOp::Grayscale => "grayscale",
            FilterOp::Brightness(_) => "brightness",
            FilterOp::Contrast(_) => "contrast",
            FilterOp::ColorOverlay { .. } => "color_overlay",
            FilterOp::EdgeDetect => "edge_detect",
            FilterOp::Emboss => "emboss",
            FilterOp::GaussianBlur => "gaussian_blur",
            FilterOp::SelectiveBlur => "selective_blur",
            FilterOp::Sketch => "sketch",
            FilterOp::Smooth(_) => "smooth",
            FilterOp::Pixelate { .. } => "pixelate",
            FilterOp::Scatter { .. } => "scatter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_range() {
        assert!(FilterOp::Brightness(255).validate().is_ok());
        assert!(FilterOp::Brightness(-255).validate().is_ok());
        assert!(matches!(
            FilterOp::Brightness(300).validate(),
            Err(EditError::InvalidParameter(_))
        ));
        assert!(matches!(
            FilterOp::Brightness(-256).validate(),
            Err(EditError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_contrast_range() {
        assert!(FilterOp::Contrast(128).validate().is_ok());
        assert!(FilterOp::Contrast(256).validate().is_err());
    }

    #[test]
    fn test_overlay_channels() {
        let ok = FilterOp::ColorOverlay {
            red: 0,
            green: 255,
            blue: 128,
            alpha: 0,
        };
        assert!(ok.validate().is_ok());

        let bad = FilterOp::ColorOverlay {
            red: 0,
            green: 256,
            blue: 0,
            alpha: 0,
        };
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("green"));

        let negative = FilterOp::ColorOverlay {
            red: -1,
            green: 0,
            blue: 0,
            alpha: 0,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_scatter_levels() {
        assert!(FilterOp::Scatter {
            subtraction: 8,
            addition: 10
        }
        .validate()
        .is_ok());
        assert!(FilterOp::Scatter {
            subtraction: 10,
            addition: 10
        }
        .validate()
        .is_err());
        assert!(FilterOp::Scatter {
            subtraction: 12,
            addition: 10
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_parameterless_ops_always_valid() {
        for op in [
            FilterOp::Negative,
            FilterOp::Grayscale,
            FilterOp::EdgeDetect,
            FilterOp::Emboss,
            FilterOp::GaussianBlur,
            FilterOp::SelectiveBlur,
            FilterOp::Sketch,
            FilterOp::Smooth(-6),
            FilterOp::Pixelate {
                block_size: 16,
                advanced: false,
            },
        ] {
            assert!(op.validate().is_ok(), "{} should validate", op.name());
        }
    }
}
