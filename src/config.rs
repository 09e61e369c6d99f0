//! Converter configuration.
//!
//! The converter runs with fixed defaults. An optional `webpify.toml` in the
//! base directory can override any of them; it is read once at startup and
//! the resulting [`ConvertConfig`] never changes afterwards.
//!
//! ## Base Directory
//!
//! Relative paths resolve against the program's own location: the crate
//! directory this binary was built from.
//!
//! ```text
//! webpify/
//! ├── webpify.toml     # Optional overrides
//! ├── input/           # Images to convert
//! └── output/          # Encoded results (created on demand)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "input"       # Source images, relative to the base directory
//! output_dir = "output"     # Converted images, relative to the base directory
//!
//! [images]
//! max_dimension = 600       # Longest edge in pixels; smaller images are never upscaled
//! quality = 85              # Lossy quality (0-100)
//! format = "webp"           # "webp" or "avif"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{ConvertSettings, OutputFormat, Quality};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the optional override file within the base directory.
pub const CONFIG_FILENAME: &str = "webpify.toml";

/// Largest edge libwebp can encode.
const WEBP_MAX_DIMENSION: u32 = 16383;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// The directory relative paths resolve against.
pub fn default_base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Converter configuration.
///
/// All fields have defaults; a config file needs only the values it wants
/// to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Directory scanned for source images.
    pub input_dir: String,
    /// Directory converted images are written to.
    pub output_dir: String,
    /// Resize and encode settings.
    pub images: ImagesConfig,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: "input".to_string(),
            output_dir: "output".to_string(),
            images: ImagesConfig::default(),
        }
    }
}

/// Resize and encode settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Bounding box edge in pixels. Applies to the longer side.
    pub max_dimension: u32,
    /// Lossy encoding quality (0 = smallest, 100 = best).
    pub quality: u32,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            max_dimension: 600,
            quality: 85,
            format: OutputFormat::Webp,
        }
    }
}

impl ConvertConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Directories are resolved against `base` before being compared.
    pub fn validate(&self, base: &Path) -> Result<(), ConfigError> {
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.max_dimension == 0 {
            return Err(ConfigError::Validation(
                "images.max_dimension must be non-zero".into(),
            ));
        }
        if self.images.format == OutputFormat::Webp
            && self.images.max_dimension > WEBP_MAX_DIMENSION
        {
            return Err(ConfigError::Validation(format!(
                "images.max_dimension must be at most {WEBP_MAX_DIMENSION} for WebP output"
            )));
        }
        if self.input_dir.trim().is_empty() || self.output_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "input_dir and output_dir must not be empty".into(),
            ));
        }
        if same_dir(&self.input_path(base), &self.output_path(base)) {
            return Err(ConfigError::Validation(
                "input_dir and output_dir must differ".into(),
            ));
        }
        Ok(())
    }

    /// Input directory resolved against `base`. Absolute paths are kept as-is.
    pub fn input_path(&self, base: &Path) -> PathBuf {
        base.join(&self.input_dir)
    }

    /// Output directory resolved against `base`. Absolute paths are kept as-is.
    pub fn output_path(&self, base: &Path) -> PathBuf {
        base.join(&self.output_dir)
    }

    /// Per-image settings handed to the imaging layer.
    pub fn settings(&self) -> ConvertSettings {
        ConvertSettings {
            max_dimension: self.images.max_dimension,
            quality: Quality::new(self.images.quality),
            format: self.images.format,
        }
    }
}

/// Drop `.` components and fold `..` into their parent, without touching
/// the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            c => components.push(c),
        }
    }
    components.iter().collect()
}

/// Both paths name the same directory, lexically or (when both exist)
/// after resolving symlinks.
fn same_dir(a: &Path, b: &Path) -> bool {
    let (a, b) = (normalize_path(a), normalize_path(b));
    if a == b {
        return true;
    }
    matches!(
        (fs::canonicalize(&a), fs::canonicalize(&b)),
        (Ok(a), Ok(b)) if a == b
    )
}

/// Load the config for a base directory.
///
/// Reads `webpify.toml` when present; a missing file means stock defaults.
/// Omitted keys fall back to their defaults through `#[serde(default)]`.
pub fn load_config(base: &Path) -> Result<ConvertConfig, ConfigError> {
    let config_path = base.join(CONFIG_FILENAME);
    let config: ConvertConfig = if config_path.exists() {
        toml::from_str(&fs::read_to_string(&config_path)?)?
    } else {
        ConvertConfig::default()
    };
    config.validate(base)?;
    Ok(config)
}

/// Returns a fully-commented stock `webpify.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# webpify configuration
# =====================
#
# Place this file next to the input/ directory as webpify.toml.
# Every key is optional; omitted keys keep the defaults shown here.

# Directory scanned for .png, .jpg, .jpeg, .webp and .gif files.
input_dir = "input"

# Directory converted images are written to. Created if missing.
output_dir = "output"

[images]
# Longest edge of the output in pixels. Aspect ratio is preserved and
# images already within the bound are left at their original size.
max_dimension = 600

# Lossy encoding quality, 0-100. 85 is a good balance of quality and size.
quality = 85

# Output format: "webp" or "avif".
format = "webp"
"##
}
