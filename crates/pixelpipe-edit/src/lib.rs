//! # pixelpipe-edit
//!
//! The editing pipeline: an [`Editor`] holds one exclusively owned pixel
//! buffer plus target metadata and exposes the chainable operations that
//! transform it.
//!
//! Decoding, encoding and the numeric-filter library are external
//! collaborators behind the [`Decode`], [`Encode`] and [`FilterBackend`]
//! traits — this crate is not a codec.
//!
//! # Example
//!
//! ```rust,ignore
//! use pixelpipe_edit::Editor;
//!
//! let mut editor = Editor::new(filters);
//! editor
//!     .load(&decoder, "in.jpg")?
//!     .resize(800, 600)?
//!     .sepia()?
//!     .sharpen()?
//!     .select_format("png")?;
//! editor.save(&encoder, "out.png")?;
//! ```
//!
//! Every operation validates fully before it replaces the buffer, so a
//! failed step leaves the editor exactly as it was.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod editor;
pub mod filters;
pub mod traits;

pub use editor::Editor;
pub use error::{EditError, EditResult};
pub use filters::FilterOp;
pub use traits::{BoxError, Decode, Encode, FilterBackend};

// The types an editor consumes and produces.
pub use pixelpipe_core::{ImageFormat, PixelBuffer, Rgba};
pub use pixelpipe_ops::{Kernel3, DEFAULT_BACKGROUND_THRESHOLD};
