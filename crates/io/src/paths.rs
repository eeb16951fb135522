//! On-disk layout of the dashboard data directory.

use std::path::{Path, PathBuf};

/// Locates every input the pipeline reads and the two documents it writes,
/// all relative to a single data root (the dashboard's `public/data`).
///
/// The output paths default to the conventional file names directly under
/// the root; use the `with_*` methods to redirect them.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
    core_output: PathBuf,
    evaluations_output: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let core_output = root.join("app_data_core.json");
        let evaluations_output = root.join("app_data_evaluations.json");
        Self {
            root,
            core_output,
            evaluations_output,
        }
    }

    /// Redirect the core document to a different path.
    pub fn with_core_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.core_output = path.into();
        self
    }

    /// Redirect the evaluations document to a different path.
    pub fn with_evaluations_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.evaluations_output = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The location reference list (`locations.csv`).
    pub fn locations_file(&self) -> PathBuf {
        self.root.join("locations.csv")
    }

    /// Per-location risk thresholds (`thresholds.csv`).
    pub fn thresholds_file(&self) -> PathBuf {
        self.root.join("thresholds.csv")
    }

    /// The current ground-truth surveillance extract.
    pub fn ground_truth_file(&self) -> PathBuf {
        self.root
            .join("ground-truth")
            .join("target-hospital-admissions.csv")
    }

    /// Directory of dated ground-truth snapshot files.
    pub fn historical_snapshot_dir(&self) -> PathBuf {
        self.root.join("ground-truth").join("historical-data")
    }

    /// Hubverse-format submission directory for one model.
    pub fn submission_dir(&self, model: &str) -> PathBuf {
        self.root.join("unprocessed").join(model)
    }

    /// Legacy-format submission directory for one model.
    pub fn archive_dir(&self, model: &str) -> PathBuf {
        self.root.join("archive").join(model)
    }

    pub fn wis_file(&self) -> PathBuf {
        self.root.join("evaluations-score").join("WIS_ratio.csv")
    }

    pub fn mape_file(&self) -> PathBuf {
        self.root.join("evaluations-score").join("MAPE.csv")
    }

    pub fn coverage_file(&self) -> PathBuf {
        self.root.join("evaluations-score").join("coverage.csv")
    }

    pub fn core_output(&self) -> &Path {
        &self.core_output
    }

    pub fn evaluations_output(&self) -> &Path {
        &self.evaluations_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outputs_default_under_root() {
        let paths = DataPaths::new("/srv/data");
        assert_eq!(
            paths.core_output(),
            Path::new("/srv/data/app_data_core.json")
        );
        assert_eq!(
            paths.evaluations_output(),
            Path::new("/srv/data/app_data_evaluations.json")
        );
    }

    #[test]
    fn output_overrides() {
        let paths = DataPaths::new("/srv/data")
            .with_core_output("/tmp/core.json")
            .with_evaluations_output("/tmp/eval.json");
        assert_eq!(paths.core_output(), Path::new("/tmp/core.json"));
        assert_eq!(paths.evaluations_output(), Path::new("/tmp/eval.json"));
        assert_eq!(paths.root(), Path::new("/srv/data"));
    }

    #[test]
    fn model_directories_embed_the_model_name() {
        let paths = DataPaths::new("/srv/data");
        assert_eq!(
            paths.submission_dir("FluSight-ensemble"),
            Path::new("/srv/data/unprocessed/FluSight-ensemble")
        );
        assert_eq!(
            paths.archive_dir("FluSight-ensemble"),
            Path::new("/srv/data/archive/FluSight-ensemble")
        );
    }

    #[test]
    fn input_files_live_in_expected_subdirectories() {
        let paths = DataPaths::new("/srv/data");
        assert_eq!(
            paths.ground_truth_file(),
            Path::new("/srv/data/ground-truth/target-hospital-admissions.csv")
        );
        assert_eq!(
            paths.historical_snapshot_dir(),
            Path::new("/srv/data/ground-truth/historical-data")
        );
        assert_eq!(
            paths.wis_file(),
            Path::new("/srv/data/evaluations-score/WIS_ratio.csv")
        );
    }
}
