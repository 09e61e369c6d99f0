//! Shared test utilities: synthetic image fixtures written to disk.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_png(&tmp.path().join("hero.png"), 1200, 1200);
//! create_test_rgba_png(&tmp.path().join("logo.png"), 64, 64);
//! create_corrupt_file(&tmp.path().join("broken.jpg"));
//! ```

use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Write an opaque RGB PNG with a gradient so encoders have real work to do.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

/// Write an RGBA PNG whose alpha varies across the image.
pub fn create_test_rgba_png(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([200, (y % 256) as u8, 40, ((x * 255) / width.max(1)) as u8])
    });
    img.save(path).unwrap();
}

/// Write a baseline JPEG.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a single-frame GIF (palette-based on disk).
pub fn create_test_gif(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        if x % 2 == 0 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
        .save_with_format(path, image::ImageFormat::Gif)
        .unwrap();
}

/// Write bytes no decoder recognizes.
pub fn create_corrupt_file(path: &Path) {
    std::fs::write(path, b"definitely not an image\x00\x01\x02").unwrap();
}
