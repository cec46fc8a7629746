// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration: where the source image lives and where results go.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KontrastError, Result};
use crate::types::{FlatImagePolicy, WorkerKind};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "KONTRAST_CONFIG";

/// Settings for one end-to-end enhancement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Source grayscale image.
    pub input: PathBuf,
    /// Directory receiving both result images and both figures.
    pub output_dir: PathBuf,
    /// File name of the contrast-stretched result.
    pub contrast_output: String,
    /// File name of the histogram-equalized result.
    pub equalization_output: String,
    /// File name of the side-by-side comparison figure.
    pub comparison_figure: String,
    /// File name of the histogram comparison figure.
    pub histogram_figure: String,
    /// How contrast stretching treats a flat image.
    pub flat_image: FlatImagePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("images/balloons.png"),
            output_dir: PathBuf::from("images"),
            contrast_output: "contrast_stretched.png".into(),
            equalization_output: "histogram_equalized.png".into(),
            comparison_figure: "comparison.png".into(),
            histogram_figure: "histograms.png".into(),
            flat_image: FlatImagePolicy::Passthrough,
        }
    }
}

impl RunConfig {
    /// Parse a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            KontrastError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Use the file named by `KONTRAST_CONFIG` when set, otherwise defaults.
    pub fn resolve() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Reject file names that would collide or escape the output directory.
    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.contrast_output,
            &self.equalization_output,
            &self.comparison_figure,
            &self.histogram_figure,
        ];
        for name in names {
            if name.is_empty() {
                return Err(KontrastError::Config("output file name is empty".into()));
            }
            if Path::new(name).components().count() != 1 {
                return Err(KontrastError::Config(format!(
                    "output file name {name:?} must not contain a directory"
                )));
            }
        }
        for (i, a) in names.iter().enumerate() {
            if names[i + 1..].contains(a) {
                return Err(KontrastError::Config(format!(
                    "output file name {a:?} is used twice"
                )));
            }
        }
        Ok(())
    }

    /// Fixed result path for a worker.
    pub fn result_path(&self, worker: WorkerKind) -> PathBuf {
        let name = match worker {
            WorkerKind::ContrastStretch => &self.contrast_output,
            WorkerKind::HistogramEqualization => &self.equalization_output,
        };
        self.output_dir.join(name)
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.output_dir.join(&self.comparison_figure)
    }

    pub fn histogram_path(&self) -> PathBuf {
        self.output_dir.join(&self.histogram_figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_into_images_dir() {
        let config = RunConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.result_path(WorkerKind::ContrastStretch),
            PathBuf::from("images/contrast_stretched.png")
        );
        assert_eq!(
            config.result_path(WorkerKind::HistogramEqualization),
            PathBuf::from("images/histogram_equalized.png")
        );
        assert_eq!(config.comparison_path(), PathBuf::from("images/comparison.png"));
        assert_eq!(config.histogram_path(), PathBuf::from("images/histograms.png"));
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kontrast.json");
        std::fs::write(&path, r#"{ "input": "scans/page.png", "flat_image": "reject" }"#)
            .unwrap();

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.input, PathBuf::from("scans/page.png"));
        assert_eq!(config.flat_image, FlatImagePolicy::Reject);
        assert_eq!(config.output_dir, PathBuf::from("images"));
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RunConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, KontrastError::Config(_)));
    }

    #[test]
    fn load_malformed_json_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = RunConfig::load(&path).unwrap_err();
        assert!(matches!(err, KontrastError::Serialization(_)));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let config = RunConfig {
            histogram_figure: "comparison.png".into(),
            ..RunConfig::default()
        };
        assert!(matches!(config.validate(), Err(KontrastError::Config(_))));
    }

    #[test]
    fn validate_rejects_nested_names() {
        let config = RunConfig {
            contrast_output: "../escape.png".into(),
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
