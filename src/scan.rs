//! Input discovery.
//!
//! Lists the input directory (non-recursively), keeps regular files whose
//! extension is recognized, and pairs each with the path its converted
//! output will be written to. Nothing here opens an image: files with other
//! extensions are skipped without ever being read.
//!
//! ```text
//! input/                      output/
//! ├── hero.PNG       ──────→  ├── hero.webp
//! ├── team.jpg       ──────→  ├── team.webp
//! ├── notes.txt      (skipped)
//! └── old/           (skipped)
//! ```
//!
//! Jobs are sorted by file name so runs are reproducible regardless of the
//! order the filesystem returns entries in.

use crate::imaging::{OutputFormat, is_supported_input};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read input directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertJob {
    /// Path of the source image.
    pub source: PathBuf,
    /// Path the encoded image is written to.
    pub output: PathBuf,
    /// Source file name, for display.
    pub file_name: String,
}

impl ConvertJob {
    /// Output file name, for display.
    pub fn output_name(&self) -> String {
        self.output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// What the input directory holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The input directory does not exist.
    InputMissing,
    /// Recognized images, sorted by file name. May be empty.
    Found(Vec<ConvertJob>),
}

/// Derive the output path: same stem, target format's extension.
pub fn output_path_for(source: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let mut name = source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_os_string();
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

/// List recognized images directly inside `input_dir`.
pub fn find_images(input_dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let read_err = |source| ScanError::ReadDir {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_supported_input(&path) {
            images.push(path);
        }
    }
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}

/// Scan `input_dir` and plan one job per recognized image.
pub fn scan(
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<Discovery, ScanError> {
    if !input_dir.is_dir() {
        return Ok(Discovery::InputMissing);
    }

    let jobs = find_images(input_dir)?
        .into_iter()
        .map(|source| ConvertJob {
            output: output_path_for(&source, output_dir, format),
            file_name: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source,
        })
        .collect();

    Ok(Discovery::Found(jobs))
}
