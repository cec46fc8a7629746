// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Comparison figures — a side-by-side panel of the original and both results,
// and a bar chart of the three histograms. Drawn with `imageproc`.

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{Histogram, IntensityMatrix, LEVELS, RunConfig};
use tracing::{debug, info, instrument};

use crate::io::codec::gray_from_matrix;

/// Gap between panels and around the canvas edge, in pixels.
const MARGIN: u32 = 16;
/// Height of each histogram panel's plotting area.
const BAR_AREA_HEIGHT: u32 = 160;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
/// Bar colours for original, contrast-stretched, equalized.
const BAR_COLORS: [Rgb<u8>; 3] = [
    Rgb([96, 96, 96]),
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
];

/// The matrices a figure renderer consumes.
#[derive(Debug, Clone, Copy)]
pub struct FigureInputs<'a> {
    pub original: &'a IntensityMatrix,
    pub contrast: &'a IntensityMatrix,
    pub equalized: &'a IntensityMatrix,
}

impl FigureInputs<'_> {
    fn panels(&self) -> [&IntensityMatrix; 3] {
        [self.original, self.contrast, self.equalized]
    }
}

/// Renders and persists the comparison figures.
pub trait FigureRenderer {
    /// Render every figure and return the paths written.
    fn render(&self, inputs: &FigureInputs<'_>) -> Result<Vec<PathBuf>>;
}

/// Writes the side-by-side comparison and the histogram comparison as PNGs.
#[derive(Debug, Clone)]
pub struct ComparisonFigures {
    comparison_path: PathBuf,
    histogram_path: PathBuf,
}

impl ComparisonFigures {
    pub fn new(comparison_path: impl Into<PathBuf>, histogram_path: impl Into<PathBuf>) -> Self {
        Self {
            comparison_path: comparison_path.into(),
            histogram_path: histogram_path.into(),
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.comparison_path(), config.histogram_path())
    }
}

impl FigureRenderer for ComparisonFigures {
    #[instrument(skip_all)]
    fn render(&self, inputs: &FigureInputs<'_>) -> Result<Vec<PathBuf>> {
        let comparison = side_by_side(inputs)?;
        comparison
            .save(&self.comparison_path)
            .map_err(|err| figure_save_error(&self.comparison_path, err))?;

        let histograms = histogram_chart(inputs);
        histograms
            .save(&self.histogram_path)
            .map_err(|err| figure_save_error(&self.histogram_path, err))?;

        info!(
            comparison = %self.comparison_path.display(),
            histograms = %self.histogram_path.display(),
            "Figures written"
        );
        Ok(vec![self.comparison_path.clone(), self.histogram_path.clone()])
    }
}

/// Lay the three matrices out left to right on a white canvas, each framed by
/// a one-pixel black border.
pub fn side_by_side(inputs: &FigureInputs<'_>) -> Result<GrayImage> {
    let panels = inputs.panels();
    let rows = inputs.original.rows();
    let cols = inputs.original.cols();
    if rows == 0 || cols == 0 {
        return Err(KontrastError::Plot("nothing to draw: image is empty".into()));
    }
    if panels.iter().any(|m| m.rows() != rows || m.cols() != cols) {
        return Err(KontrastError::Plot("panels differ in shape".into()));
    }

    let (w, h) = (cols as u32, rows as u32);
    let canvas_w = 3 * w + 4 * MARGIN;
    let canvas_h = h + 2 * MARGIN;
    let mut canvas = GrayImage::from_pixel(canvas_w, canvas_h, Luma([255]));

    for (k, matrix) in panels.into_iter().enumerate() {
        let x = MARGIN + k as u32 * (w + MARGIN);
        let panel = gray_from_matrix(matrix).map_err(|err| KontrastError::Plot(err.to_string()))?;
        image::imageops::replace(&mut canvas, &panel, i64::from(x), i64::from(MARGIN));
        let frame = Rect::at(x as i32 - 1, MARGIN as i32 - 1).of_size(w + 2, h + 2);
        draw_hollow_rect_mut(&mut canvas, frame, Luma([0]));
    }

    debug!(canvas_w, canvas_h, "Side-by-side figure composed");
    Ok(canvas)
}

/// Draw one 256-bin bar chart per matrix, left to right. Each panel is scaled
/// to its own tallest bin.
pub fn histogram_chart(inputs: &FigureInputs<'_>) -> RgbImage {
    let panel_w = LEVELS as u32;
    let canvas_w = 3 * panel_w + 4 * MARGIN;
    let canvas_h = BAR_AREA_HEIGHT + 2 * MARGIN;
    let mut canvas = RgbImage::from_pixel(canvas_w, canvas_h, BACKGROUND);
    let baseline = (MARGIN + BAR_AREA_HEIGHT) as f32;

    for (k, (matrix, color)) in inputs.panels().into_iter().zip(BAR_COLORS).enumerate() {
        let x0 = MARGIN + k as u32 * (panel_w + MARGIN);
        let histogram = Histogram::of(matrix);

        for (level, height) in bar_heights(&histogram, BAR_AREA_HEIGHT).into_iter().enumerate() {
            if height == 0 {
                continue;
            }
            let top = MARGIN + BAR_AREA_HEIGHT - height;
            let bar = Rect::at((x0 + level as u32) as i32, top as i32).of_size(1, height);
            draw_filled_rect_mut(&mut canvas, bar, color);
        }

        draw_line_segment_mut(
            &mut canvas,
            (x0 as f32, baseline),
            ((x0 + panel_w - 1) as f32, baseline),
            AXIS,
        );
    }

    canvas
}

/// Scale histogram counts to bar heights in `[0, max_height]`.
///
/// Any non-empty bin gets at least one pixel so sparse levels stay visible.
pub fn bar_heights(histogram: &Histogram, max_height: u32) -> [u32; LEVELS] {
    let peak = histogram.peak();
    let mut heights = [0u32; LEVELS];
    if peak == 0 {
        return heights;
    }
    for (h, &count) in heights.iter_mut().zip(histogram.counts()) {
        if count > 0 {
            let scaled = (count as f64 / peak as f64 * f64::from(max_height)).round() as u32;
            *h = scaled.clamp(1, max_height);
        }
    }
    heights
}

fn figure_save_error(path: &Path, err: image::ImageError) -> KontrastError {
    KontrastError::Plot(format!("failed to save figure {}: {}", path.display(), err))
}
