//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: identify and convert.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — the `image` crate for
//! decoding and resampling, libwebp for lossy WebP encoding.

use super::params::ConvertParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },
    #[error("{format} encode failed: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn as_tuple(self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for image processing backends.
///
/// Both operations must be implemented so the batch loop stays
/// backend-agnostic and can be driven by a mock in tests.
pub trait ImageBackend {
    /// Get image dimensions without a full decode where the format allows it.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, normalize its color mode, resize to
    /// `params.width` x `params.height` and encode to `params.output`.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
