//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Found 2 image(s) to process
//!
//! Processing: hero.png
//!   Original: 1200x1200
//!   Resized:  600x600
//!   Size:     500.0KB -> 41.2KB (92% smaller)
//!   Output:   hero.webp
//!
//! Processing: broken.jpg
//!   ERROR: Failed to decode input/broken.jpg: Format error decoding Jpeg
//!
//! Done! Converted 1 of 2 image(s), 1 failed. Output is in output/
//! ```
//!
//! The `Processing:` header is printed when a file starts, so a slow encode
//! or an interrupted run still shows which file was in progress.
//!
//! # Architecture
//!
//! Each message has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::convert::{BatchReport, ConvertEvent, FileOutcome};
use crate::imaging::{ConversionStats, supported_input_extensions};
use crate::scan::ConvertJob;
use std::path::Path;

/// Indentation for per-file detail lines.
const DETAIL: &str = "  ";

fn dims(d: (u32, u32)) -> String {
    format!("{}x{}", d.0, d.1)
}

/// `41% smaller`, or `12% larger` when the output grew.
fn reduction_label(percent: f64) -> String {
    if percent < 0.0 {
        format!("{:.0}% larger", -percent)
    } else {
        format!("{:.0}% smaller", percent)
    }
}

fn stats_lines(stats: &ConversionStats, output_name: &str) -> Vec<String> {
    vec![
        format!("{DETAIL}Original: {}", dims(stats.original_dims)),
        format!("{DETAIL}Resized:  {}", dims(stats.resized_dims)),
        format!(
            "{DETAIL}Size:     {:.1}KB -> {:.1}KB ({})",
            stats.original_kb(),
            stats.output_kb(),
            reduction_label(stats.reduction_percent())
        ),
        format!("{DETAIL}Output:   {}", output_name),
    ]
}

/// Header printed as a file starts, before any decoding happens.
pub fn format_started(job: &ConvertJob) -> String {
    format!("Processing: {}", job.file_name)
}

/// Format the detail lines for one finished file, followed by a blank separator.
pub fn format_outcome(outcome: &FileOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    match &outcome.result {
        Ok(stats) => lines.extend(stats_lines(stats, &outcome.job.output_name())),
        Err(err) => lines.push(format!("{DETAIL}ERROR: {}", err)),
    }
    lines.push(String::new());
    lines
}

/// Format a progress event as display lines.
pub fn format_event(event: &ConvertEvent<'_>) -> Vec<String> {
    match event {
        ConvertEvent::Found { count } => {
            vec![format!("Found {} image(s) to process", count), String::new()]
        }
        ConvertEvent::FileStarted { job } => vec![format_started(job)],
        ConvertEvent::FileFinished { outcome } => format_outcome(outcome),
    }
}

/// Print a progress event to stdout.
pub fn print_event(event: &ConvertEvent<'_>) {
    for line in format_event(event) {
        println!("{}", line);
    }
}

/// Format the closing message for a batch.
pub fn format_summary(report: &BatchReport) -> Vec<String> {
    match report {
        BatchReport::InputMissing { input_dir } => {
            vec![format!("Input directory not found: {}", input_dir.display())]
        }
        BatchReport::InputUnreadable { input_dir, message } => vec![format!(
            "Cannot read input directory {}: {}",
            input_dir.display(),
            message
        )],
        BatchReport::NothingToDo { input_dir } => vec![
            format!("No images found in {}", input_dir.display()),
            format!(
                "Supported formats: {}",
                supported_input_extensions()
                    .iter()
                    .map(|e| format!(".{e}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ],
        BatchReport::Completed { output_dir, .. } => {
            let total = report.outcomes().len();
            let failed = report.failed();
            let failed_note = if failed > 0 {
                format!(", {} failed", failed)
            } else {
                String::new()
            };
            vec![format!(
                "Done! Converted {} of {} image(s){}. Output is in {}",
                report.converted(),
                total,
                failed_note,
                display_dir(output_dir)
            )]
        }
    }
}

fn display_dir(dir: &Path) -> String {
    format!("{}/", dir.display())
}

/// Print the closing message to stdout.
pub fn print_summary(report: &BatchReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
