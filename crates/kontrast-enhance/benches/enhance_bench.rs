// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the two pixel transformations in kontrast-enhance,
// run on a synthetic low-contrast 512x512 gradient.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use kontrast_core::IntensityMatrix;
use kontrast_enhance::{ContrastStretch, Enhancement, HistogramEqualization};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Diagonal gradient squeezed into [60, 187], the kind of washed-out input
/// both transformations are meant for.
fn low_contrast_gradient(side: usize) -> IntensityMatrix {
    let data = (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            (60 + (row + col) * 127 / (2 * side - 2)) as u8
        })
        .collect();
    IntensityMatrix::new(side, side, data).expect("square buffer")
}

fn bench_contrast_stretch(c: &mut Criterion) {
    let input = low_contrast_gradient(512);
    let stretch = ContrastStretch::default();

    c.bench_function("contrast_stretch (512x512)", |b| {
        b.iter(|| black_box(stretch.apply(black_box(&input)).expect("stretch")));
    });
}

fn bench_histogram_equalization(c: &mut Criterion) {
    let input = low_contrast_gradient(512);

    c.bench_function("histogram_equalization (512x512)", |b| {
        b.iter(|| black_box(HistogramEqualization.apply(black_box(&input)).expect("equalize")));
    });
}

criterion_group!(benches, bench_contrast_stretch, bench_histogram_equalization);
criterion_main!(benches);
