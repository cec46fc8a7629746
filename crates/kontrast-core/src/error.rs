// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Kontrast.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::WorkerKind;

/// Top-level error type for all Kontrast operations.
#[derive(Debug, Error)]
pub enum KontrastError {
    // -- Image codec --
    #[error("failed to load image {}: {reason}", .path.display())]
    ImageLoad { path: PathBuf, reason: String },

    #[error("failed to save image {}: {reason}", .path.display())]
    ImageSave { path: PathBuf, reason: String },

    #[error("cannot prepare output directory {}: {reason}", .path.display())]
    OutputDir { path: PathBuf, reason: String },

    // -- Transformations --
    #[error("image has no pixels")]
    EmptyImage,

    #[error("degenerate intensity range: every pixel equals {value}")]
    DegenerateRange { value: u8 },

    #[error("buffer of {len} pixels does not fit a {rows}x{cols} matrix")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    // -- Workers --
    #[error("{worker} worker panicked")]
    WorkerPanicked { worker: WorkerKind },

    #[error("{}", summarize_failures(.0))]
    Workers(Vec<WorkerFailure>),

    // -- Presentation --
    #[error("figure rendering failed: {0}")]
    Plot(String),

    // -- Configuration / persistence --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A failure captured inside one worker and handed back at join.
#[derive(Debug, Error)]
#[error("{worker}: {error}")]
pub struct WorkerFailure {
    pub worker: WorkerKind,
    #[source]
    pub error: KontrastError,
}

impl WorkerFailure {
    pub fn new(worker: WorkerKind, error: KontrastError) -> Self {
        Self { worker, error }
    }
}

fn summarize_failures(failures: &[WorkerFailure]) -> String {
    let details: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!("{} worker(s) failed: {}", failures.len(), details.join("; "))
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KontrastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregated_failure_names_each_worker() {
        let err = KontrastError::Workers(vec![
            WorkerFailure::new(
                WorkerKind::ContrastStretch,
                KontrastError::DegenerateRange { value: 42 },
            ),
            WorkerFailure::new(
                WorkerKind::HistogramEqualization,
                KontrastError::ImageSave {
                    path: PathBuf::from("/nope/out.png"),
                    reason: "permission denied".into(),
                },
            ),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 worker(s) failed"), "{text}");
        assert!(text.contains("Contrast stretching: degenerate intensity range"));
        assert!(text.contains("Histogram equalization: failed to save image /nope/out.png"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: KontrastError = io.into();
        assert!(matches!(err, KontrastError::Io(_)));
    }
}
