//! Image processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` (header only) |
//! | **Normalize** | RGB8 / RGBA8 via `DynamicImage::into_rgb8` / `into_rgba8` |
//! | **Resize** | Lanczos3, fit within a square bounding box, never upscale |
//! | **Encode** | libwebp (lossy WebP) or rav1e (AVIF) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{fit_within, reduction_percent};
pub use operations::{ConversionStats, ConvertSettings, convert_image, get_dimensions};
pub use params::{ConvertParams, OutputFormat, Quality};
pub use rust_backend::{
    CodecError, RustBackend, check_codecs, is_supported_input, supported_input_extensions,
};
