//! The batch conversion loop.
//!
//! Takes the jobs discovered by [`scan`](crate::scan) and converts them one at
//! a time, in order:
//!
//! ```text
//! input/hero.png → decode → normalize → resize (≤ 600px) → encode → output/hero.webp
//! ```
//!
//! ## Fault Isolation
//!
//! Every job produces a [`FileOutcome`] holding either the conversion
//! statistics or the error that stopped it. A corrupt or unreadable file
//! never aborts the batch: its error is recorded and the loop moves on to
//! the next job. Nothing is retried.
//!
//! ## Progress
//!
//! Callers observe progress through a [`ConvertEvent`] callback invoked
//! synchronously as each file starts and finishes, and get the full
//! [`BatchReport`] back once the loop ends.
//!
//! ## Informational Outcomes
//!
//! A missing, empty, or unreadable input directory is not a failure: the
//! batch returns a report saying so and writes nothing.

use crate::config::ConvertConfig;
use crate::imaging::{
    BackendError, ConversionStats, ConvertSettings, ImageBackend, RustBackend, convert_image,
};
use crate::scan::{self, ConvertJob, Discovery, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a single file could not be converted.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{0}")]
    Imaging(#[from] BackendError),
    #[error("Cannot create output directory {path}: {message}")]
    OutputDir { path: PathBuf, message: String },
}

/// The result of converting one file.
#[derive(Debug)]
pub struct FileOutcome {
    pub job: ConvertJob,
    pub result: Result<ConversionStats, ConvertError>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Progress notifications, delivered in job order.
#[derive(Debug)]
pub enum ConvertEvent<'a> {
    /// Recognized images were found and conversion is about to start.
    Found { count: usize },
    /// Conversion of one file is about to begin.
    FileStarted { job: &'a ConvertJob },
    /// One file has been converted or has failed.
    FileFinished { outcome: &'a FileOutcome },
}

/// What a batch run did.
#[derive(Debug)]
pub enum BatchReport {
    /// The input directory does not exist. Nothing was written.
    InputMissing { input_dir: PathBuf },
    /// The input directory holds no recognized images. Nothing was written.
    NothingToDo { input_dir: PathBuf },
    /// The input directory exists but could not be listed. Nothing was written.
    InputUnreadable { input_dir: PathBuf, message: String },
    /// Every recognized image was attempted; outcomes are in job order.
    Completed {
        output_dir: PathBuf,
        outcomes: Vec<FileOutcome>,
    },
}

impl From<ScanError> for BatchReport {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::ReadDir { path, source } => BatchReport::InputUnreadable {
                input_dir: path,
                message: source.to_string(),
            },
        }
    }
}

impl BatchReport {
    /// Per-file outcomes; empty unless the batch ran.
    pub fn outcomes(&self) -> &[FileOutcome] {
        match self {
            BatchReport::Completed { outcomes, .. } => outcomes,
            _ => &[],
        }
    }

    pub fn converted(&self) -> usize {
        self.outcomes().iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes().iter().filter(|o| !o.is_success()).count()
    }
}

/// Run the batch with the production backend.
pub fn convert(
    config: &ConvertConfig,
    base_dir: &Path,
    on_event: impl FnMut(ConvertEvent<'_>),
) -> BatchReport {
    convert_with_backend(&RustBackend::new(), config, base_dir, on_event)
}

/// Run the batch using a specific backend (allows testing with mock).
pub fn convert_with_backend(
    backend: &impl ImageBackend,
    config: &ConvertConfig,
    base_dir: &Path,
    mut on_event: impl FnMut(ConvertEvent<'_>),
) -> BatchReport {
    let input_dir = config.input_path(base_dir);
    let output_dir = config.output_path(base_dir);
    let settings = config.settings();

    let jobs = match scan::scan(&input_dir, &output_dir, settings.format) {
        Err(err) => {
            warn!(error = %err, "input directory unreadable");
            return err.into();
        }
        Ok(Discovery::InputMissing) => {
            info!(dir = %input_dir.display(), "input directory missing");
            return BatchReport::InputMissing { input_dir };
        }
        Ok(Discovery::Found(jobs)) if jobs.is_empty() => {
            info!(dir = %input_dir.display(), "no recognized images");
            return BatchReport::NothingToDo { input_dir };
        }
        Ok(Discovery::Found(jobs)) => jobs,
    };

    on_event(ConvertEvent::Found { count: jobs.len() });

    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in jobs {
        on_event(ConvertEvent::FileStarted { job: &job });
        let result = convert_job(backend, &job, &output_dir, &settings);
        match &result {
            Ok(stats) => debug!(
                file = %job.file_name,
                from = ?stats.original_dims,
                to = ?stats.resized_dims,
                bytes = stats.output_bytes,
                "converted"
            ),
            Err(err) => warn!(file = %job.file_name, error = %err, "conversion failed"),
        }
        let outcome = FileOutcome { job, result };
        on_event(ConvertEvent::FileFinished { outcome: &outcome });
        outcomes.push(outcome);
    }

    let report = BatchReport::Completed {
        output_dir,
        outcomes,
    };
    info!(
        converted = report.converted(),
        failed = report.failed(),
        "batch finished"
    );
    report
}

/// Convert one job. The output directory is created on demand, so a
/// failure to create it surfaces as a per-file error.
fn convert_job(
    backend: &impl ImageBackend,
    job: &ConvertJob,
    output_dir: &Path,
    settings: &ConvertSettings,
) -> Result<ConversionStats, ConvertError> {
    fs::create_dir_all(output_dir).map_err(|e| ConvertError::OutputDir {
        path: output_dir.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(file = %job.file_name, "converting");
    Ok(convert_image(backend, &job.source, &job.output, settings)?)
}
