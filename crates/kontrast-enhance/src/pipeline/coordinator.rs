// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Coordinator — load the source image once, fan out to the two workers, join
// both, and hand the results to the figure renderer.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{IntensityMatrix, RunConfig, WorkerFailure, WorkerKind};
use tracing::{info, instrument, warn};

use super::worker::{WorkerJob, WorkerOutcome, WorkerResult, run_concurrently};
use crate::io::codec::{FsCodec, ImageCodec};
use crate::io::figures::{ComparisonFigures, FigureInputs, FigureRenderer};
use crate::transform::{ContrastStretch, HistogramEqualization};

/// Coordinator lifecycle.
///
/// `Idle → Loaded → WorkersRunning → WorkersJoined → Reported`, with `Failed`
/// reachable from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loaded,
    WorkersRunning,
    WorkersJoined,
    Reported,
    Failed,
}

/// Everything a successful run produced.
#[derive(Debug)]
pub struct RunReport {
    /// The decoded source.
    pub original: IntensityMatrix,
    pub contrast: WorkerResult,
    pub equalization: WorkerResult,
    /// Load + both computations + join.
    pub total: Duration,
    /// Figures that were written.
    pub figures: Vec<PathBuf>,
    /// Set when figure rendering failed; the numeric results are still valid.
    pub figure_error: Option<KontrastError>,
}

impl RunReport {
    /// The three timing lines: each worker, then the whole run.
    pub fn timing_lines(&self) -> [String; 3] {
        [
            format_timing(self.contrast.worker.label(), self.contrast.elapsed),
            format_timing(self.equalization.worker.label(), self.equalization.elapsed),
            format_timing("Total", self.total),
        ]
    }

    /// Every file the run wrote.
    pub fn written_files(&self) -> Vec<PathBuf> {
        let mut files = vec![
            self.contrast.saved_to.clone(),
            self.equalization.saved_to.clone(),
        ];
        files.extend(self.figures.iter().cloned());
        files
    }
}

/// `<label>: <seconds with 4 decimal places>s`
pub fn format_timing(label: &str, elapsed: Duration) -> String {
    format!("{}: {:.4}s", label, elapsed.as_secs_f64())
}

/// Runs one image through both workers.
pub struct Coordinator<C = FsCodec, F = ComparisonFigures> {
    config: RunConfig,
    codec: C,
    figures: F,
    stage: Stage,
}

impl Coordinator {
    /// Coordinator using the filesystem codec and PNG figures at the configured
    /// paths.
    pub fn new(config: RunConfig) -> Self {
        let figures = ComparisonFigures::from_config(&config);
        Self::with_collaborators(config, FsCodec, figures)
    }
}

impl<C: ImageCodec, F: FigureRenderer> Coordinator<C, F> {
    pub fn with_collaborators(config: RunConfig, codec: C, figures: F) -> Self {
        Self {
            config,
            codec,
            figures,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Load, enhance on two threads, join, and render.
    ///
    /// Fails with `ImageLoad` before any worker starts if the source cannot be
    /// decoded, and with `Workers` naming each failed worker if either worker
    /// fails. Figure failures are recorded in the report instead.
    #[instrument(skip(self), fields(input = %self.config.input.display()))]
    pub fn run(&mut self) -> Result<RunReport> {
        let outcome = self.run_stages();
        if let Err(err) = &outcome {
            warn!(stage = ?self.stage, error = %err, "Run failed");
            self.stage = Stage::Failed;
        }
        outcome
    }

    fn run_stages(&mut self) -> Result<RunReport> {
        let started = Instant::now();
        self.config.validate()?;

        let original = self.codec.decode(&self.config.input)?;
        if original.is_empty() {
            return Err(KontrastError::EmptyImage);
        }
        self.stage = Stage::Loaded;
        info!(rows = original.rows(), cols = original.cols(), "Source loaded");

        std::fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            KontrastError::OutputDir {
                path: self.config.output_dir.clone(),
                reason: e.to_string(),
            }
        })?;

        let stretch = ContrastStretch::new(self.config.flat_image);
        let jobs = [
            WorkerJob {
                enhancement: &stretch,
                destination: self.config.result_path(WorkerKind::ContrastStretch),
            },
            WorkerJob {
                enhancement: &HistogramEqualization,
                destination: self.config.result_path(WorkerKind::HistogramEqualization),
            },
        ];

        self.stage = Stage::WorkersRunning;
        let [contrast, equalization] = run_concurrently(&jobs, &original, &self.codec);
        self.stage = Stage::WorkersJoined;

        let (contrast, equalization) = collect_outcomes(contrast, equalization)?;
        let total = started.elapsed();
        info!(total_s = total.as_secs_f64(), "Both workers joined");

        let inputs = FigureInputs {
            original: &original,
            contrast: &contrast.output,
            equalized: &equalization.output,
        };
        let (figures, figure_error) = match self.figures.render(&inputs) {
            Ok(paths) => (paths, None),
            Err(err) => {
                warn!(error = %err, "Figure rendering failed; results are kept");
                (Vec::new(), Some(err))
            }
        };

        self.stage = Stage::Reported;
        Ok(RunReport {
            original,
            contrast,
            equalization,
            total,
            figures,
            figure_error,
        })
    }
}

/// Both results, or an aggregated failure naming every worker that failed.
fn collect_outcomes(
    contrast: WorkerOutcome,
    equalization: WorkerOutcome,
) -> Result<(WorkerResult, WorkerResult)> {
    match (contrast, equalization) {
        (Ok(c), Ok(e)) => Ok((c, e)),
        (c, e) => {
            let failures: Vec<WorkerFailure> =
                [c.err(), e.err()].into_iter().flatten().collect();
            Err(KontrastError::Workers(failures))
        }
    }
}
