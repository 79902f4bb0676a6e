use std::fs;
use std::path::{Path, PathBuf};

use hom_core::{Distribution, ErrorInfo, HomError};

/// File stem of a combination: `d{distribution}_snr{trunc(snr)}dB`.
pub fn artifact_stem(distribution: Distribution, snr_db: f64) -> String {
    format!("d{}_snr{}dB", distribution.id(), snr_db.trunc() as i64)
}

/// Directory layout of a sweep's artifacts under one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    /// Layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding composites.
    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    /// Directory holding ground-truth documents.
    pub fn ground_truth_dir(&self) -> PathBuf {
        self.root.join("gt")
    }

    /// Directory holding evaluation documents.
    pub fn evaluations_dir(&self) -> PathBuf {
        self.root.join("evaluations")
    }

    /// Directory holding exported assessment files.
    pub fn assessment_dir(&self) -> PathBuf {
        self.root.join("assessment")
    }

    /// Composite raster of a combination.
    pub fn image_path(&self, distribution: Distribution, snr_db: f64) -> PathBuf {
        self.images_dir()
            .join(format!("{}.tiff", artifact_stem(distribution, snr_db)))
    }

    /// Ground-truth document of a combination.
    pub fn ground_truth_path(&self, distribution: Distribution, snr_db: f64) -> PathBuf {
        self.ground_truth_dir()
            .join(format!("{}.json", artifact_stem(distribution, snr_db)))
    }

    /// Evaluation document of a combination.
    pub fn evaluation_path(&self, distribution: Distribution, snr_db: f64) -> PathBuf {
        self.evaluations_dir()
            .join(format!("{}_eval.json", artifact_stem(distribution, snr_db)))
    }

    /// Aggregated metrics CSV.
    pub fn metrics_csv_path(&self) -> PathBuf {
        self.assessment_dir().join("metrics.csv")
    }

    /// Aggregated summary document.
    pub fn summary_path(&self) -> PathBuf {
        self.assessment_dir().join("summary.json")
    }

    /// Markdown report.
    pub fn report_path(&self) -> PathBuf {
        self.assessment_dir().join("report.md")
    }

    /// Run manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("run_manifest.json")
    }

    /// `path` relative to the root when it lives below it.
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Creates every artifact directory.
    pub fn ensure_dirs(&self) -> Result<(), HomError> {
        for dir in [
            self.images_dir(),
            self.ground_truth_dir(),
            self.evaluations_dir(),
            self.assessment_dir(),
        ] {
            fs::create_dir_all(&dir).map_err(|err| {
                HomError::Io(
                    ErrorInfo::new("layout-dir", err.to_string())
                        .with_context("path", dir.display().to_string()),
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_truncate_snr() {
        assert_eq!(artifact_stem(Distribution::Gaussian, 50.0), "d0_snr50dB");
        assert_eq!(artifact_stem(Distribution::Exponential, 7.9), "d2_snr7dB");
        assert_eq!(artifact_stem(Distribution::Uniform, -2.5), "d1_snr-2dB");
        assert_eq!(artifact_stem(Distribution::Unknown(9), 0.0), "d9_snr0dB");
    }

    #[test]
    fn paths_follow_layout() {
        let layout = ArtifactLayout::new("/runs/a");
        assert_eq!(
            layout.image_path(Distribution::Uniform, 15.0),
            PathBuf::from("/runs/a/images/d1_snr15dB.tiff")
        );
        assert_eq!(
            layout.evaluation_path(Distribution::Uniform, 15.0),
            PathBuf::from("/runs/a/evaluations/d1_snr15dB_eval.json")
        );
        assert_eq!(
            layout.relative(&layout.ground_truth_path(Distribution::Gaussian, 0.0)),
            "gt/d0_snr0dB.json"
        );
    }
}
