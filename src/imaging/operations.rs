//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{fit_within, reduction_percent};
use super::params::{ConvertParams, OutputFormat, Quality};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok(dims.as_tuple())
}

/// Settings shared by every conversion in a batch.
#[derive(Debug, Clone)]
pub struct ConvertSettings {
    /// Longest allowed edge in pixels.
    pub max_dimension: u32,
    pub quality: Quality,
    pub format: OutputFormat,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            max_dimension: 600,
            quality: Quality::default(),
            format: OutputFormat::default(),
        }
    }
}

/// Before/after figures for one converted image.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionStats {
    pub original_dims: (u32, u32),
    pub resized_dims: (u32, u32),
    pub original_bytes: u64,
    pub output_bytes: u64,
}

impl ConversionStats {
    pub fn original_kb(&self) -> f64 {
        self.original_bytes as f64 / 1024.0
    }

    pub fn output_kb(&self) -> f64 {
        self.output_bytes as f64 / 1024.0
    }

    /// `(1 - output/original) * 100`.
    pub fn reduction_percent(&self) -> f64 {
        reduction_percent(self.original_bytes, self.output_bytes)
    }

    /// Whether the image was scaled down.
    pub fn was_resized(&self) -> bool {
        self.original_dims != self.resized_dims
    }
}

/// Plan a conversion without executing it.
///
/// Useful for testing parameter generation.
pub fn plan_conversion(
    source: &Path,
    output: &Path,
    original_dims: (u32, u32),
    settings: &ConvertSettings,
) -> ConvertParams {
    let (width, height) = fit_within(original_dims, settings.max_dimension);
    ConvertParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: settings.quality,
        format: settings.format,
    }
}

/// Convert one image: identify, fit within the bounding box, encode, then
/// measure both files on disk.
pub fn convert_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    settings: &ConvertSettings,
) -> Result<ConversionStats> {
    let original_dims = get_dimensions(backend, source)?;
    let params = plan_conversion(source, output, original_dims, settings);
    backend.convert(&params)?;

    let original_bytes = std::fs::metadata(source)?.len();
    let output_bytes = std::fs::metadata(output)?.len();

    Ok(ConversionStats {
        original_dims,
        resized_dims: (params.width, params.height),
        original_bytes,
        output_bytes,
    })
}
