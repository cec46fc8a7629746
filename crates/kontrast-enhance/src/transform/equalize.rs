// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Histogram equalization — remap intensities through the cumulative
// distribution of the image's own histogram.

use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{Histogram, IntensityMatrix, LEVELS, WorkerKind};
use tracing::{debug, info, instrument};

use super::{Enhancement, to_level};

/// Global histogram equalization: `G = round(255 * cdf[I])`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramEqualization;

impl HistogramEqualization {
    /// Build the 256-entry mapping from a histogram's cumulative probability.
    pub fn lookup_table(histogram: &Histogram) -> [u8; LEVELS] {
        let cdf = histogram.cumulative();
        let mut lut = [0u8; LEVELS];
        for (out, &p) in lut.iter_mut().zip(cdf.iter()) {
            *out = to_level(255.0 * p);
        }
        lut
    }
}

impl Enhancement for HistogramEqualization {
    fn kind(&self) -> WorkerKind {
        WorkerKind::HistogramEqualization
    }

    #[instrument(skip_all, fields(rows = input.rows(), cols = input.cols()))]
    fn apply(&self, input: &IntensityMatrix) -> Result<IntensityMatrix> {
        if input.is_empty() {
            return Err(KontrastError::EmptyImage);
        }

        let histogram = Histogram::of(input);
        let occupied = histogram.counts().iter().filter(|&&c| c > 0).count();
        debug!(occupied, peak = histogram.peak(), "Histogram computed");

        let lut = Self::lookup_table(&histogram);
        let output = input.map_lut(&lut);
        info!(occupied, "Histogram equalization applied");
        Ok(output)
    }
}
