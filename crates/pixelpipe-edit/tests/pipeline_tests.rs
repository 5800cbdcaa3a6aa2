//! End-to-end pipeline tests with stub collaborators.
//!
//! The decoder, encoder and filter backend are replaced by in-memory stubs
//! so the tests exercise the pipeline contract itself: operation chaining,
//! validation-before-mutation, format resolution, and delegation to the
//! external filter library.

use pixelpipe_core::{ImageFormat, PixelBuffer, Rgba, CHANNELS};
use pixelpipe_edit::{BoxError, Decode, EditError, Editor, Encode, FilterBackend, FilterOp};
use std::cell::RefCell;
use std::path::Path;
use tempfile::tempdir;

/// Filter backend that records every delegated operation and returns the
/// buffer unchanged.
#[derive(Default)]
struct RecordingBackend {
    applied: RefCell<Vec<&'static str>>,
}

impl FilterBackend for RecordingBackend {
    fn apply_filter(
        &self,
        buffer: &PixelBuffer,
        filter: &FilterOp,
    ) -> Result<PixelBuffer, BoxError> {
        self.applied.borrow_mut().push(filter.name());
        Ok(buffer.clone())
    }
}

/// Decoder that serves a fixed buffer regardless of the file contents.
struct FixedDecoder {
    buffer: PixelBuffer,
    format: ImageFormat,
}

impl Decode for FixedDecoder {
    fn decode(&self, _path: &Path) -> Result<(PixelBuffer, ImageFormat), BoxError> {
        Ok((self.buffer.clone(), self.format))
    }
}

/// Decoder that always fails, standing in for a corrupt stream.
struct FailingDecoder;

impl Decode for FailingDecoder {
    fn decode(&self, _path: &Path) -> Result<(PixelBuffer, ImageFormat), BoxError> {
        Err("corrupt stream".into())
    }
}

/// Decoder that must never run; used to prove the extension gate fires
/// before decoding.
struct UnreachableDecoder;

impl Decode for UnreachableDecoder {
    fn decode(&self, path: &Path) -> Result<(PixelBuffer, ImageFormat), BoxError> {
        panic!("decoder invoked for {}", path.display());
    }
}

/// Encoder that dumps raw RGBA bytes and records the requested format.
#[derive(Default)]
struct RawEncoder {
    last_format: RefCell<Option<ImageFormat>>,
}

impl Encode for RawEncoder {
    fn encode(
        &self,
        buffer: &PixelBuffer,
        format: ImageFormat,
        path: &Path,
    ) -> Result<(), BoxError> {
        *self.last_format.borrow_mut() = Some(format);
        std::fs::write(path, buffer.data())?;
        Ok(())
    }
}

/// Encoder that always fails, standing in for a write error.
struct FailingEncoder;

impl Encode for FailingEncoder {
    fn encode(
        &self,
        _buffer: &PixelBuffer,
        _format: ImageFormat,
        _path: &Path,
    ) -> Result<(), BoxError> {
        Err("disk full".into())
    }
}

fn gray_decoder(width: u32, height: u32, format: ImageFormat) -> FixedDecoder {
    FixedDecoder {
        buffer: PixelBuffer::new(width, height, Rgba::opaque(128, 128, 128)).unwrap(),
        format,
    }
}

#[test]
fn full_chain_load_edit_save() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("out.jpeg");
    let decoder = gray_decoder(32, 24, ImageFormat::Jpeg);
    let encoder = RawEncoder::default();

    let mut editor = Editor::new(RecordingBackend::default());
    editor
        .load(&decoder, "photos/input.jpg")
        .unwrap()
        .resize(16, 12)
        .unwrap()
        .sepia()
        .unwrap()
        .sharpen()
        .unwrap();
    editor.save(&encoder, &out_path).unwrap();

    assert_eq!(*encoder.last_format.borrow(), Some(ImageFormat::Jpeg));
    let written = std::fs::read(&out_path).unwrap();
    assert_eq!(written.len(), 16 * 12 * CHANNELS);
}

#[test]
fn load_rejects_unknown_extension_before_decoding() {
    let mut editor = Editor::new(RecordingBackend::default());
    // UnreachableDecoder panics if consulted; the extension gate must fire
    // first.
    let err = editor
        .load(&UnreachableDecoder, "scan.tiff")
        .unwrap_err();
    assert!(matches!(
        err,
        EditError::Core(pixelpipe_core::Error::UnsupportedFormat(_))
    ));

    let err = editor.load(&UnreachableDecoder, "no_extension").unwrap_err();
    assert!(matches!(
        err,
        EditError::Core(pixelpipe_core::Error::UnsupportedFormat(_))
    ));
}

#[test]
fn decode_failure_is_wrapped() {
    let mut editor = Editor::new(RecordingBackend::default());
    let err = editor.load(&FailingDecoder, "photo.png").unwrap_err();
    assert!(matches!(err, EditError::Decode(_)));
    assert!(err.to_string().contains("corrupt stream"));
    // Still empty: operations keep failing with NoImageLoaded.
    assert!(matches!(editor.sepia(), Err(EditError::NoImageLoaded)));
}

#[test]
fn encode_failure_is_wrapped() {
    let decoder = gray_decoder(4, 4, ImageFormat::Png);
    let mut editor = Editor::new(RecordingBackend::default());
    editor.load(&decoder, "in.png").unwrap();
    let err = editor.save(&FailingEncoder, "out.png").unwrap_err();
    assert!(matches!(err, EditError::Encode(_)));
}

#[test]
fn save_before_load_fails() {
    let editor = Editor::new(RecordingBackend::default());
    let err = editor.save(&RawEncoder::default(), "out.png").unwrap_err();
    assert!(matches!(err, EditError::NoImageLoaded));
}

#[test]
fn save_prefers_selected_format_over_source() {
    let dir = tempdir().unwrap();
    let decoder = gray_decoder(4, 4, ImageFormat::Png);
    let encoder = RawEncoder::default();

    let mut editor = Editor::new(RecordingBackend::default());
    editor
        .load(&decoder, "in.png")
        .unwrap()
        .select_format("jpg")
        .unwrap();
    editor.save(&encoder, dir.path().join("out.jpeg")).unwrap();

    // "jpg" canonicalized at selection time.
    assert_eq!(*encoder.last_format.borrow(), Some(ImageFormat::Jpeg));
}

#[test]
fn background_removal_saves_as_png() {
    let dir = tempdir().unwrap();
    let decoder = gray_decoder(6, 6, ImageFormat::Jpeg);
    let encoder = RawEncoder::default();

    let mut editor = Editor::new(RecordingBackend::default());
    editor
        .load(&decoder, "flat.jpeg")
        .unwrap()
        .remove_background(30)
        .unwrap();
    editor.save(&encoder, dir.path().join("cut.png")).unwrap();

    // JPEG cannot carry the alpha the mask just produced.
    assert_eq!(*encoder.last_format.borrow(), Some(ImageFormat::Png));
    // The uniform input is entirely background.
    let buffer = editor.buffer().unwrap();
    assert!(buffer.pixels().all(|(_, _, px)| px.is_transparent()));
}

#[test]
fn sepia_reference_value_through_pipeline() {
    let decoder = gray_decoder(3, 3, ImageFormat::Png);
    let mut editor = Editor::new(RecordingBackend::default());
    editor.load(&decoder, "gray.png").unwrap().sepia().unwrap();
    assert_eq!(
        editor.buffer().unwrap().get(1, 1).unwrap(),
        Rgba::opaque(173, 154, 120)
    );
}

#[test]
fn identity_convolution_is_lossless_through_pipeline() {
    let decoder = gray_decoder(5, 5, ImageFormat::Png);
    let mut editor = Editor::new(RecordingBackend::default());
    editor.load(&decoder, "in.png").unwrap();
    let before = editor.buffer().unwrap().clone();

    let identity = vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 0.0],
    ];
    editor.custom_convolution(&identity).unwrap();
    assert_eq!(editor.buffer().unwrap(), &before);
}

#[test]
fn delegated_filters_reach_backend_in_order() {
    let decoder = gray_decoder(4, 4, ImageFormat::Png);
    let backend = RecordingBackend::default();
    let mut editor = Editor::new(&backend);
    editor
        .load(&decoder, "in.png")
        .unwrap()
        .negative()
        .unwrap()
        .grayscale()
        .unwrap()
        .adjust_brightness(-40)
        .unwrap()
        .adjust_contrast(15)
        .unwrap()
        .color_overlay(255, 0, 0, 64)
        .unwrap()
        .edge_detection()
        .unwrap()
        .emboss()
        .unwrap()
        .gaussian_blur()
        .unwrap()
        .selective_blur()
        .unwrap()
        .sketch()
        .unwrap()
        .smooth(-6)
        .unwrap()
        .pixelate(16, false)
        .unwrap()
        .scatter(8, 10)
        .unwrap();

    assert_eq!(
        *backend.applied.borrow(),
        vec![
            "negative",
            "grayscale",
            "brightness",
            "contrast",
            "color_overlay",
            "edge_detect",
            "emboss",
            "gaussian_blur",
            "selective_blur",
            "sketch",
            "smooth",
            "pixelate",
            "scatter",
        ]
    );
}

#[test]
fn rejected_filter_never_reaches_backend() {
    let decoder = gray_decoder(4, 4, ImageFormat::Png);
    let backend = RecordingBackend::default();
    let mut editor = Editor::new(&backend);
    editor.load(&decoder, "in.png").unwrap();

    assert!(matches!(
        editor.adjust_brightness(300),
        Err(EditError::InvalidParameter(_))
    ));
    assert!(matches!(
        editor.scatter(10, 10),
        Err(EditError::InvalidParameter(_))
    ));
    assert!(matches!(
        editor.color_overlay(0, 0, 300, 0),
        Err(EditError::InvalidParameter(_))
    ));
    assert!(backend.applied.borrow().is_empty());
}

#[test]
fn resize_dimensions_property() {
    let decoder = gray_decoder(64, 48, ImageFormat::Png);
    let mut editor = Editor::new(RecordingBackend::default());
    editor.load(&decoder, "in.png").unwrap();
    for (w, h) in [(1, 1), (13, 7), (64, 48), (100, 200)] {
        editor.resize(w, h).unwrap();
        assert_eq!(editor.dimensions(), Some((w, h)));
    }
}
