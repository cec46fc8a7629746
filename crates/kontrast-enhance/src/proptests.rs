// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Property tests over random intensity matrices.

use kontrast_core::{FlatImagePolicy, Histogram, IntensityMatrix, LEVELS};
use proptest::prelude::*;

use crate::transform::{ContrastStretch, Enhancement, HistogramEqualization};

/// Random non-empty matrices up to 24x24.
fn matrix() -> impl Strategy<Value = IntensityMatrix> {
    (1usize..=24, 1usize..=24).prop_flat_map(|(rows, cols)| {
        proptest::collection::vec(any::<u8>(), rows * cols)
            .prop_map(move |data| IntensityMatrix::new(rows, cols, data).unwrap())
    })
}

proptest! {
    #[test]
    fn stretch_keeps_shape_and_spans_range(input in matrix()) {
        let out = ContrastStretch::new(FlatImagePolicy::Passthrough).apply(&input).unwrap();
        prop_assert_eq!((out.rows(), out.cols()), (input.rows(), input.cols()));

        let (lo, hi) = input.min_max().unwrap();
        if lo < hi {
            prop_assert_eq!(out.min_max(), Some((0, 255)));
        } else {
            prop_assert_eq!(&out, &input);
        }
    }

    #[test]
    fn stretch_preserves_pixel_order(input in matrix()) {
        let out = ContrastStretch::default().apply(&input).unwrap();
        let mut pairs: Vec<(u8, u8)> = input
            .as_slice()
            .iter()
            .copied()
            .zip(out.as_slice().iter().copied())
            .collect();
        pairs.sort_unstable();
        prop_assert!(pairs.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn equalize_keeps_shape_and_tops_out(input in matrix()) {
        let out = HistogramEqualization.apply(&input).unwrap();
        prop_assert_eq!((out.rows(), out.cols()), (input.rows(), input.cols()));
        // The brightest input level always has cumulative probability 1.0.
        prop_assert_eq!(out.min_max().map(|(_, hi)| hi), Some(255));
    }

    #[test]
    fn cumulative_is_monotone_and_ends_at_one(input in matrix()) {
        let cdf = Histogram::of(&input).cumulative();
        prop_assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!((cdf[LEVELS - 1] - 1.0).abs() < 1e-9);
        prop_assert!(cdf.iter().all(|&p| (0.0..=1.0 + 1e-9).contains(&p)));
    }

    #[test]
    fn equalization_lut_never_exceeds_255(input in matrix()) {
        let lut = HistogramEqualization::lookup_table(&Histogram::of(&input));
        prop_assert!(lut.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(lut[LEVELS - 1], 255);
    }
}
