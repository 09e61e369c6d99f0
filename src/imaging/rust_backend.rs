//! Pure Rust decoding and resampling, libwebp for lossy WebP.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, JPEG, WebP, GIF) | `image` crate (pure Rust decoders, format sniffed from content) |
//! | Color normalize | `DynamicImage::into_rgb8` / `into_rgba8` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → WebP | `webp::Encoder` (libwebp, lossy) |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ConvertParams, OutputFormat, Quality};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::path::Path;
use thiserror::Error;

/// Recognized input extensions and the decoder each one needs.
const INPUT_FORMATS: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("webp", ImageFormat::WebP),
    ("gif", ImageFormat::Gif),
];

/// Returns the recognized input extensions (lowercase, without the dot).
pub fn supported_input_extensions() -> Vec<&'static str> {
    INPUT_FORMATS.iter().map(|(ext, _)| *ext).collect()
}

/// Whether `path` has a recognized input extension (case-insensitive).
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            INPUT_FORMATS
                .iter()
                .any(|(ext, _)| e.eq_ignore_ascii_case(ext))
        })
}

/// A codec the converter cannot run without.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("no decoder compiled in for .{0} files")]
    MissingDecoder(&'static str),
    #[error("{format} encoder unavailable: {source}")]
    EncoderUnavailable {
        format: OutputFormat,
        source: BackendError,
    },
}

/// Verify every recognized input format can be decoded and that `format`
/// can be encoded, by encoding a 1x1 probe image in memory.
pub fn check_codecs(format: OutputFormat) -> Result<(), CodecError> {
    for (ext, fmt) in INPUT_FORMATS {
        if !fmt.reading_enabled() {
            return Err(CodecError::MissingDecoder(ext));
        }
    }

    let probe = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128])));
    encode(&probe, format, Quality::default())
        .map(|_| ())
        .map_err(|source| CodecError::EncoderUnavailable { format, source })
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file's magic bytes, so a mislabeled
/// extension still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Convert any decoded representation into one the encoders accept.
///
/// Anything carrying alpha becomes RGBA8 so transparency survives; all
/// other modes (grayscale, 16-bit, float) become opaque RGB8. Palette
/// images arrive here already expanded by the decoder.
pub fn normalize_color(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.into_rgba8()),
        other => DynamicImage::ImageRgb8(other.into_rgb8()),
    }
}

/// Resample to exactly `width` x `height`, or return the image untouched
/// if it already has those dimensions.
fn resize_to(img: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if img.width() == width && img.height() == height {
        return img;
    }
    img.resize_exact(width, height, FilterType::Lanczos3)
}

/// Encode a normalized image into `format`.
fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, BackendError> {
    match format {
        OutputFormat::Webp => encode_webp(img, quality),
        OutputFormat::Avif => encode_avif(img, quality),
    }
}

/// Lossy WebP through libwebp. Only RGB8/RGBA8 are accepted.
fn encode_webp(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let encoder = webp::Encoder::from_image(img).map_err(|e| BackendError::Encode {
        format: "WebP",
        message: e.to_string(),
    })?;
    let encoded = encoder
        .encode_simple(false, quality.value() as f32)
        .map_err(|e| BackendError::Encode {
            format: "WebP",
            message: format!("{e:?}"),
        })?;
    Ok(encoded.to_vec())
}

/// AVIF through rav1e (speed=6 for reasonable throughput).
fn encode_avif(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    let mut buf = Vec::new();
    // rav1e rejects quality 0
    let q = quality.value().clamp(1, 100) as u8;
    let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(&mut buf, 6, q);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode {
            format: "AVIF",
            message: e.to_string(),
        })?;
    Ok(buf)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = normalize_color(load_image(&params.source)?);
        let resized = resize_to(img, params.width, params.height);
        let bytes = encode(&resized, params.format, params.quality)?;
        std::fs::write(&params.output, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use image::{GrayImage, Luma, LumaA, Rgb, RgbImage};

    fn params(source: &Path, output: &Path, width: u32, height: u32) -> ConvertParams {
        ConvertParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            quality: Quality::new(85),
            format: OutputFormat::Webp,
        }
    }

    #[test]
    fn supported_extensions_are_the_recognized_set() {
        let exts = supported_input_extensions();
        assert_eq!(exts, vec!["png", "jpg", "jpeg", "webp", "gif"]);
    }

    #[test]
    fn is_supported_input_ignores_case() {
        assert!(is_supported_input(Path::new("a.PNG")));
        assert!(is_supported_input(Path::new("a.JpEg")));
        assert!(is_supported_input(Path::new("dir/a.gif")));
        assert!(!is_supported_input(Path::new("a.tiff")));
        assert!(!is_supported_input(Path::new("a.txt")));
        assert!(!is_supported_input(Path::new("png")));
    }

    #[test]
    fn codecs_available_for_both_formats() {
        check_codecs(OutputFormat::Webp).unwrap();
        check_codecs(OutputFormat::Avif).unwrap();
    }

    #[test]
    fn normalize_keeps_rgb8_and_rgba8() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])));
        assert!(matches!(normalize_color(rgb), DynamicImage::ImageRgb8(_)));

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
        assert!(matches!(normalize_color(rgba), DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn normalize_grayscale_becomes_rgb() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([200])));
        let normalized = normalize_color(gray);
        let DynamicImage::ImageRgb8(buf) = normalized else {
            panic!("expected Rgb8");
        };
        assert_eq!(buf.get_pixel(0, 0), &Rgb([200, 200, 200]));
    }

    #[test]
    fn normalize_gray_alpha_keeps_transparency() {
        let gray_alpha = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(
            2,
            2,
            LumaA([50u8, 10]),
        ));
        let normalized = normalize_color(gray_alpha);
        let DynamicImage::ImageRgba8(buf) = normalized else {
            panic!("expected Rgba8");
        };
        assert_eq!(buf.get_pixel(1, 1), &Rgba([50, 50, 50, 10]));
    }

    #[test]
    fn normalize_sixteen_bit_rgb_becomes_rgb8() {
        let deep = DynamicImage::ImageRgb16(image::ImageBuffer::from_pixel(
            1,
            1,
            Rgb([65535u16, 0, 0]),
        ));
        assert!(matches!(normalize_color(deep), DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn identify_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        create_test_png(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn identify_sniffs_mislabeled_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let png = tmp.path().join("real.png");
        create_test_png(&png, 40, 30);
        let mislabeled = tmp.path().join("actually-png.jpg");
        std::fs::copy(&png, &mislabeled).unwrap();

        let dims = RustBackend::new().identify(&mislabeled).unwrap();
        assert_eq!(dims, Dimensions { width: 40, height: 30 });
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn convert_corrupt_file_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.png");
        create_corrupt_file(&source);
        let output = tmp.path().join("broken.webp");

        let result = RustBackend::new().convert(&params(&source, &output, 10, 10));
        assert!(matches!(result, Err(BackendError::Decode { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn convert_png_to_webp_resizes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 400, 300);
        let output = tmp.path().join("source.webp");

        RustBackend::new()
            .convert(&params(&source, &output, 200, 150))
            .unwrap();

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 150));
    }

    #[test]
    fn convert_jpeg_and_gif_inputs() {
        let tmp = tempfile::TempDir::new().unwrap();
        let jpeg = tmp.path().join("photo.jpeg");
        create_test_jpeg(&jpeg, 64, 48);
        let gif = tmp.path().join("anim.gif");
        create_test_gif(&gif, 32, 32);

        let backend = RustBackend::new();
        let jpeg_out = tmp.path().join("photo.webp");
        backend.convert(&params(&jpeg, &jpeg_out, 64, 48)).unwrap();
        let gif_out = tmp.path().join("anim.webp");
        backend.convert(&params(&gif, &gif_out, 32, 32)).unwrap();

        assert_eq!(image::image_dimensions(&jpeg_out).unwrap(), (64, 48));
        assert_eq!(image::image_dimensions(&gif_out).unwrap(), (32, 32));
    }

    #[test]
    fn convert_webp_input_reencodes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("first.png");
        create_test_png(&source, 120, 80);
        let first = tmp.path().join("first.webp");
        let backend = RustBackend::new();
        backend.convert(&params(&source, &first, 120, 80)).unwrap();

        let second = tmp.path().join("second.webp");
        backend.convert(&params(&first, &second, 60, 40)).unwrap();
        assert_eq!(image::image_dimensions(&second).unwrap(), (60, 40));
    }

    #[test]
    fn convert_preserves_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        create_test_rgba_png(&source, 64, 64);
        let output = tmp.path().join("logo.webp");

        RustBackend::new()
            .convert(&params(&source, &output, 32, 32))
            .unwrap();

        let decoded = image::open(&output).unwrap();
        assert!(decoded.color().has_alpha());
        let rgba = decoded.to_rgba8();
        assert!(rgba.pixels().any(|p| p.0[3] < 255));
    }

    #[test]
    fn convert_to_avif_writes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 64, 48);
        let output = tmp.path().join("source.avif");

        RustBackend::new()
            .convert(&ConvertParams {
                format: OutputFormat::Avif,
                ..params(&source, &output, 32, 24)
            })
            .unwrap();

        assert!(std::fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn convert_into_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        create_test_png(&source, 16, 16);
        let output = tmp.path().join("missing/dir/source.webp");

        let result = RustBackend::new().convert(&params(&source, &output, 16, 16));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
