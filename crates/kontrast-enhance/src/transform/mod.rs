// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel-level transformations — contrast stretching and histogram equalization.

pub mod equalize;
pub mod stretch;

pub use equalize::HistogramEqualization;
pub use stretch::ContrastStretch;

use kontrast_core::error::Result;
use kontrast_core::{IntensityMatrix, WorkerKind};

/// A whole-image transformation run by one worker.
///
/// Implementations read the input through a shared reference and return a
/// fully populated matrix of the same shape.
pub trait Enhancement: Sync {
    /// Which worker this transformation belongs to.
    fn kind(&self) -> WorkerKind;

    /// Produce the transformed matrix.
    fn apply(&self, input: &IntensityMatrix) -> Result<IntensityMatrix>;
}

/// Round half away from zero and narrow to an 8-bit level.
///
/// Both transformations only produce values in [0, 255] before rounding; the
/// clamp guards against floating-point overshoot at the upper boundary.
pub(crate) fn to_level(value: f64) -> u8 {
    let rounded = value.round();
    debug_assert!(
        (-0.5..=255.5).contains(&rounded),
        "level {rounded} out of range"
    );
    rounded.clamp(0.0, 255.0) as u8
}
