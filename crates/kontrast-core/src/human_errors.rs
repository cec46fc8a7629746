// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable failure reports.
//
// Every error is mapped to the stage of the run that failed, a plain message,
// and a suggestion for what to try next.

use crate::error::KontrastError;
use crate::types::WorkerKind;

/// The part of a run that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading the configuration file.
    Configuration,
    /// Decoding the source image.
    Load,
    /// Inside one of the two workers.
    Worker(WorkerKind),
    /// Several workers failed at once.
    Workers,
    /// Preparing or writing files under the output directory.
    Output,
    /// Rendering or saving the comparison figures.
    Presentation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => f.write_str("configuration"),
            Self::Load => f.write_str("image load"),
            Self::Worker(kind) => write!(f, "{} worker", kind.label().to_lowercase()),
            Self::Workers => f.write_str("workers"),
            Self::Output => f.write_str("output"),
            Self::Presentation => f.write_str("presentation"),
        }
    }
}

/// A failure description suitable for printing to the terminal.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Which stage failed.
    pub stage: Stage,
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}\n  hint: {}", self.stage, self.message, self.suggestion)
    }
}

/// Convert a `KontrastError` into a `HumanError`.
pub fn humanize_error(err: &KontrastError) -> HumanError {
    match err {
        KontrastError::ImageLoad { path, reason } => HumanError {
            stage: Stage::Load,
            message: format!("Could not read the source image {}.", path.display()),
            suggestion: format!(
                "Check that the file exists and is a PNG, JPEG, or other supported format. ({reason})"
            ),
        },

        KontrastError::ImageSave { path, reason } => HumanError {
            stage: Stage::Output,
            message: format!("Could not write {}.", path.display()),
            suggestion: format!("Make sure the output directory is writable. ({reason})"),
        },

        KontrastError::OutputDir { path, reason } => HumanError {
            stage: Stage::Output,
            message: format!("Could not create the output directory {}.", path.display()),
            suggestion: format!(
                "Set \"output_dir\" to a writable directory that is not an existing file. ({reason})"
            ),
        },

        KontrastError::EmptyImage => HumanError {
            stage: Stage::Load,
            message: "The source image has no pixels.".into(),
            suggestion: "Use an image that is at least 1x1.".into(),
        },

        KontrastError::DegenerateRange { value } => HumanError {
            stage: Stage::Worker(WorkerKind::ContrastStretch),
            message: format!("Every pixel has intensity {value}, so there is no range to stretch."),
            suggestion: "Set \"flat_image\" to \"passthrough\" to copy flat images unchanged.".into(),
        },

        KontrastError::ShapeMismatch { .. } => HumanError {
            stage: Stage::Load,
            message: "The decoded pixel buffer does not match the image dimensions.".into(),
            suggestion: format!("Re-export the image and try again. ({err})"),
        },

        KontrastError::WorkerPanicked { worker } => HumanError {
            stage: Stage::Worker(*worker),
            message: format!("The {} worker stopped unexpectedly.", worker.label().to_lowercase()),
            suggestion: "Run again with RUST_LOG=debug and report the log.".into(),
        },

        KontrastError::Workers(failures) => match failures.as_slice() {
            [single] => {
                let inner = humanize_error(&single.error);
                HumanError {
                    stage: Stage::Worker(single.worker),
                    message: inner.message,
                    suggestion: inner.suggestion,
                }
            }
            _ => HumanError {
                stage: Stage::Workers,
                message: err.to_string(),
                suggestion: "Fix the first failure listed and run again.".into(),
            },
        },

        KontrastError::Plot(detail) => HumanError {
            stage: Stage::Presentation,
            message: "The comparison figures could not be produced.".into(),
            suggestion: format!("The result images were still saved. ({detail})"),
        },

        KontrastError::Config(detail) => HumanError {
            stage: Stage::Configuration,
            message: "The configuration is invalid.".into(),
            suggestion: format!("Fix the file named by KONTRAST_CONFIG or unset it. ({detail})"),
        },

        KontrastError::Serialization(detail) => HumanError {
            stage: Stage::Configuration,
            message: "The configuration file is not valid JSON.".into(),
            suggestion: format!("Fix the syntax error and try again. ({detail})"),
        },

        KontrastError::Io(detail) => HumanError {
            stage: Stage::Output,
            message: "A file operation failed.".into(),
            suggestion: format!("Check disk space and permissions. ({detail})"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WorkerFailure;
    use std::path::PathBuf;

    #[test]
    fn load_errors_name_the_load_stage() {
        let err = KontrastError::ImageLoad {
            path: PathBuf::from("images/balloons.png"),
            reason: "No such file or directory".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.stage, Stage::Load);
        assert!(human.message.contains("images/balloons.png"));
    }

    #[test]
    fn single_worker_failure_names_that_worker() {
        let err = KontrastError::Workers(vec![WorkerFailure::new(
            WorkerKind::HistogramEqualization,
            KontrastError::ImageSave {
                path: PathBuf::from("out/eq.png"),
                reason: "read-only".into(),
            },
        )]);
        let human = humanize_error(&err);
        assert_eq!(human.stage, Stage::Worker(WorkerKind::HistogramEqualization));
        assert!(human.to_string().starts_with("[histogram equalization worker]"));
    }

    #[test]
    fn output_dir_errors_keep_the_path() {
        let err = KontrastError::OutputDir {
            path: PathBuf::from("runs/images"),
            reason: "File exists".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.stage, Stage::Output);
        assert!(human.message.contains("runs/images"));
        assert!(human.to_string().starts_with("[output]"));
    }

    #[test]
    fn bare_save_errors_are_not_presentation() {
        let err = KontrastError::ImageSave {
            path: PathBuf::from("out/cs.png"),
            reason: "read-only".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.stage, Stage::Output);
        assert!(human.suggestion.contains("read-only"));
    }

    #[test]
    fn double_failure_lists_both_workers() {
        let err = KontrastError::Workers(vec![
            WorkerFailure::new(
                WorkerKind::ContrastStretch,
                KontrastError::WorkerPanicked {
                    worker: WorkerKind::ContrastStretch,
                },
            ),
            WorkerFailure::new(WorkerKind::HistogramEqualization, KontrastError::EmptyImage),
        ]);
        let human = humanize_error(&err);
        assert_eq!(human.stage, Stage::Workers);
        assert!(human.message.contains("Contrast stretching"));
        assert!(human.message.contains("Histogram equalization"));
    }
}
