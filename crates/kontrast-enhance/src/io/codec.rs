// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image codec — decode a file into an intensity matrix and encode a matrix
// back to disk, using the `image` crate.

use std::path::Path;

use image::GrayImage;
use kontrast_core::IntensityMatrix;
use kontrast_core::error::{KontrastError, Result};
use tracing::{debug, info, instrument};

/// Reads source images and writes result images.
///
/// Shared by both workers, so implementations must be `Sync`.
pub trait ImageCodec: Sync {
    /// Decode the image at `path` into 8-bit grayscale.
    fn decode(&self, path: &Path) -> Result<IntensityMatrix>;

    /// Encode `matrix` to `path`. The format follows the file extension.
    fn encode(&self, matrix: &IntensityMatrix, path: &Path) -> Result<()>;
}

/// Filesystem codec backed by `image::open` / `ImageBuffer::save`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsCodec;

impl ImageCodec for FsCodec {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn decode(&self, path: &Path) -> Result<IntensityMatrix> {
        let image = image::open(path).map_err(|err| KontrastError::ImageLoad {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        info!(
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "Source image loaded"
        );
        // Color sources are reduced to luma here; grayscale ones pass through.
        matrix_from_gray(&image.to_luma8())
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn encode(&self, matrix: &IntensityMatrix, path: &Path) -> Result<()> {
        let save_error = |reason: String| KontrastError::ImageSave {
            path: path.to_path_buf(),
            reason,
        };
        let gray = gray_from_matrix(matrix).map_err(|err| save_error(err.to_string()))?;
        gray.save(path).map_err(|err| save_error(err.to_string()))?;
        debug!(rows = matrix.rows(), cols = matrix.cols(), "Image written");
        Ok(())
    }
}

/// Copy a `GrayImage` into an `IntensityMatrix` (rows = height, cols = width).
pub fn matrix_from_gray(gray: &GrayImage) -> Result<IntensityMatrix> {
    let (width, height) = gray.dimensions();
    IntensityMatrix::new(height as usize, width as usize, gray.as_raw().clone())
}

/// Copy an `IntensityMatrix` into a `GrayImage`.
pub fn gray_from_matrix(matrix: &IntensityMatrix) -> Result<GrayImage> {
    let mismatch = || KontrastError::ShapeMismatch {
        rows: matrix.rows(),
        cols: matrix.cols(),
        len: matrix.len(),
    };
    let width = u32::try_from(matrix.cols()).map_err(|_| mismatch())?;
    let height = u32::try_from(matrix.rows()).map_err(|_| mismatch())?;
    GrayImage::from_raw(width, height, matrix.as_slice().to_vec()).ok_or_else(mismatch)
}
