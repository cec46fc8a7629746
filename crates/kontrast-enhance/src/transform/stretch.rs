// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast stretching — linear rescale of intensities so the darkest input
// pixel maps to 0 and the brightest to 255.

use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{FlatImagePolicy, IntensityMatrix, LEVELS, WorkerKind};
use tracing::{debug, info, instrument, warn};

use super::{Enhancement, to_level};

/// Linear contrast stretch: `G = round(255 / (Imax - Imin) * (I - Imin))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContrastStretch {
    /// Behaviour when `Imax == Imin`.
    flat_image: FlatImagePolicy,
}

impl ContrastStretch {
    pub fn new(flat_image: FlatImagePolicy) -> Self {
        Self { flat_image }
    }

    /// Build the 256-entry mapping for an input spanning `[min, max]`.
    ///
    /// Levels below `min` map to 0 and levels above `max` map to 255. Returns
    /// `None` unless `min < max`.
    pub(crate) fn lookup_table(min: u8, max: u8) -> Option<[u8; LEVELS]> {
        if min >= max {
            return None;
        }
        let scale = 255.0 / f64::from(max - min);
        let mut lut = [0u8; LEVELS];
        for (level, out) in lut.iter_mut().enumerate() {
            *out = match level {
                l if l <= min as usize => 0,
                l if l >= max as usize => 255,
                l => to_level(scale * (l - min as usize) as f64),
            };
        }
        Some(lut)
    }
}

impl Enhancement for ContrastStretch {
    fn kind(&self) -> WorkerKind {
        WorkerKind::ContrastStretch
    }

    #[instrument(skip_all, fields(rows = input.rows(), cols = input.cols()))]
    fn apply(&self, input: &IntensityMatrix) -> Result<IntensityMatrix> {
        let (min, max) = input.min_max().ok_or(KontrastError::EmptyImage)?;
        debug!(min, max, "Intensity range computed");

        let Some(lut) = Self::lookup_table(min, max) else {
            return match self.flat_image {
                FlatImagePolicy::Passthrough => {
                    warn!(value = min, "Flat image; copying input unchanged");
                    Ok(input.clone())
                }
                FlatImagePolicy::Reject => Err(KontrastError::DegenerateRange { value: min }),
            };
        };
        let output = input.map_lut(&lut);
        info!(min, max, "Contrast stretch applied");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stretch(rows: &[&[u8]]) -> IntensityMatrix {
        let input = IntensityMatrix::from_rows(rows).unwrap();
        ContrastStretch::default().apply(&input).unwrap()
    }

    #[test]
    fn two_by_two_spans_full_range() {
        let out = stretch(&[&[10, 20], &[30, 40]]);
        assert_eq!(out, IntensityMatrix::from_rows(&[[0u8, 85], [170, 255]]).unwrap());
    }

    #[test]
    fn full_range_input_is_unchanged() {
        let row: Vec<u8> = (0..=255).collect();
        let input = IntensityMatrix::from_rows(&[row.clone(), row.iter().rev().copied().collect()])
            .unwrap();
        let out = ContrastStretch::default().apply(&input).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn flat_image_passthrough_copies_input() {
        let input = IntensityMatrix::filled(4, 5, 77);
        let out = ContrastStretch::new(FlatImagePolicy::Passthrough)
            .apply(&input)
            .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn flat_image_reject_reports_degenerate_range() {
        let input = IntensityMatrix::filled(3, 3, 0);
        let err = ContrastStretch::new(FlatImagePolicy::Reject)
            .apply(&input)
            .unwrap_err();
        assert!(matches!(err, KontrastError::DegenerateRange { value: 0 }));
    }

    #[test]
    fn empty_image_is_an_error() {
        let input = IntensityMatrix::new(0, 0, Vec::new()).unwrap();
        let err = ContrastStretch::default().apply(&input).unwrap_err();
        assert!(matches!(err, KontrastError::EmptyImage));
    }

    #[test]
    fn two_level_image_becomes_black_and_white() {
        let out = stretch(&[&[100, 101, 100], &[101, 100, 101]]);
        assert_eq!(out.as_slice(), &[0, 255, 0, 255, 0, 255]);
    }

    #[test]
    fn lookup_table_is_monotone() {
        let lut = ContrastStretch::lookup_table(37, 180).unwrap();
        assert_eq!(lut[0], 0);
        assert_eq!(lut[37], 0);
        assert_eq!(lut[180], 255);
        assert_eq!(lut[255], 255);
        assert!(lut.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn lookup_table_needs_a_range() {
        assert!(ContrastStretch::lookup_table(90, 90).is_none());
        assert!(ContrastStretch::lookup_table(200, 10).is_none());
        assert_eq!(ContrastStretch::lookup_table(0, 1).unwrap()[1], 255);
    }

    #[test]
    fn output_keeps_shape() {
        let out = stretch(&[&[5, 6, 7, 8], &[9, 10, 11, 12], &[13, 14, 15, 16]]);
        assert_eq!((out.rows(), out.cols()), (3, 4));
    }
}
