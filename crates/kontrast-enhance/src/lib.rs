// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kontrast-enhance — Grayscale enhancement for Kontrast.
//
// Provides the two pixel transformations (contrast stretching, histogram
// equalization), the image codec and figure collaborators, and the coordinator
// that runs both transformations on their own threads and joins them.

pub mod io;
pub mod pipeline;
pub mod transform;

// Re-export the primary types so callers can use `kontrast_enhance::Coordinator` etc.
pub use io::{ComparisonFigures, FsCodec, ImageCodec};
pub use pipeline::{Coordinator, RunReport, Stage, WorkerResult};
pub use transform::{ContrastStretch, Enhancement, HistogramEqualization};

#[cfg(test)]
mod proptests;
