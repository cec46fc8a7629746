// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Kontrast: the intensity matrix shared by both workers,
// the 256-bin histogram, and worker identities.

use serde::{Deserialize, Serialize};

use crate::error::{KontrastError, Result};

/// Number of distinct 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// An M x N grid of 8-bit grayscale intensities, stored row-major.
///
/// Once built, a matrix is never mutated: transformations read it through a
/// shared reference and produce a fresh matrix of the same shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl IntensityMatrix {
    /// Build a matrix from a row-major buffer.
    ///
    /// Fails with `ShapeMismatch` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(KontrastError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(KontrastError::ShapeMismatch {
                    rows: rows.len(),
                    cols,
                    len: data.len() + row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, data)
    }

    /// A matrix of the given shape with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of pixels (`rows * cols`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the row-major pixel buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Global (minimum, maximum) intensity, or `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(u8, u8)> {
        self.data.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Apply a 256-entry lookup table to every pixel, producing a new matrix of
    /// the same shape.
    pub fn map_lut(&self, lut: &[u8; LEVELS]) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| lut[v as usize]).collect(),
        }
    }
}

/// Occurrence counts for each of the 256 intensity levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    /// Count how often each intensity occurs in `matrix`.
    pub fn of(matrix: &IntensityMatrix) -> Self {
        let mut counts = [0u64; LEVELS];
        for &v in matrix.as_slice() {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    /// Sum of all bins.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Height of the tallest bin.
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Per-level occurrence probability (`count / total`).
    ///
    /// Returns all zeros for an empty histogram.
    pub fn probabilities(&self) -> [f64; LEVELS] {
        let total = self.total();
        let mut probs = [0.0f64; LEVELS];
        if total == 0 {
            return probs;
        }
        for (p, &count) in probs.iter_mut().zip(self.counts.iter()) {
            *p = count as f64 / total as f64;
        }
        probs
    }

    /// Running sum of `probabilities()`. Non-decreasing; the last entry is 1.0
    /// (within floating-point tolerance) for any non-empty histogram.
    pub fn cumulative(&self) -> [f64; LEVELS] {
        let mut cdf = self.probabilities();
        let mut acc = 0.0f64;
        for c in cdf.iter_mut() {
            acc += *c;
            *c = acc;
        }
        cdf
    }
}

/// Identifies one of the two fixed workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkerKind {
    ContrastStretch,
    HistogramEqualization,
}

impl WorkerKind {
    /// Label used in timing lines and failure reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ContrastStretch => "Contrast stretching",
            Self::HistogramEqualization => "Histogram equalization",
        }
    }

    /// OS thread name for the worker.
    pub fn thread_name(&self) -> &'static str {
        match self {
            Self::ContrastStretch => "contrast-stretch",
            Self::HistogramEqualization => "histogram-equalization",
        }
    }
}

impl std::fmt::Display for WorkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What contrast stretching does with a flat image (`Imax == Imin`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatImagePolicy {
    /// Return an exact copy of the input.
    #[default]
    Passthrough,
    /// Fail with `DegenerateRange`.
    Reject,
}
