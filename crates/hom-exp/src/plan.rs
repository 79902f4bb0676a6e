use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use hom_core::{Distribution, ErrorInfo, GridGeometry, HomError, StreamPolicy};
use hom_eval::DEFAULT_ACCEPTABLE_ERROR;
use hom_gen::{CollageSpec, GenerationOptions, NoiseSpec};
use serde::{Deserialize, Serialize};

use crate::layout::artifact_stem;
use crate::serde::{from_json_slice, from_yaml_slice};

fn invalid(code: &str, message: &str) -> HomError {
    HomError::Config(ErrorInfo::new(code, message))
}

/// One `(distribution, snr)` point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Position in the distribution-major traversal.
    pub index: usize,
    /// Distribution family.
    pub distribution: Distribution,
    /// Nominal SNR in decibels.
    pub snr_db: f64,
}

/// Full description of a distribution × SNR sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Distribution families, in traversal order.
    #[serde(default = "SweepPlan::default_distributions")]
    pub distributions: Vec<Distribution>,
    /// SNR levels in decibels, in traversal order.
    #[serde(default = "SweepPlan::default_snr_levels")]
    pub snr_levels: Vec<f64>,
    /// Master seed for every random draw of the sweep.
    #[serde(default = "SweepPlan::default_seed")]
    pub seed: u64,
    /// Raster layout shared by generation and evaluation.
    #[serde(default)]
    pub geometry: GridGeometry,
    /// Mean per grid row.
    #[serde(default = "SweepPlan::default_means")]
    pub means: Vec<f64>,
    /// Spread per grid column.
    #[serde(default = "SweepPlan::default_spreads")]
    pub spreads: Vec<f64>,
    /// Mean of the injected noise.
    #[serde(default)]
    pub noise_offset: f64,
    /// How combinations receive their random streams.
    #[serde(default)]
    pub stream_policy: StreamPolicy,
    /// Worker threads used by per-combination streams and evaluation.
    #[serde(default = "SweepPlan::default_concurrency")]
    pub concurrency: usize,
    /// Threshold for the first-acceptable SNR query.
    #[serde(default = "SweepPlan::default_acceptable_error")]
    pub acceptable_error: f64,
    /// Reject unknown distribution identifiers instead of emitting zero cells.
    #[serde(default)]
    pub strict_distributions: bool,
}

impl SweepPlan {
    fn default_distributions() -> Vec<Distribution> {
        Distribution::KNOWN.to_vec()
    }

    fn default_snr_levels() -> Vec<f64> {
        (0..=10).map(|step| f64::from(step) * 5.0).collect()
    }

    const fn default_seed() -> u64 {
        42
    }

    fn default_means() -> Vec<f64> {
        vec![44.0, 88.0, 132.0, 176.0, 220.0]
    }

    fn default_spreads() -> Vec<f64> {
        vec![0.5, 1.0, 1.5, 2.0, 2.5]
    }

    const fn default_concurrency() -> usize {
        1
    }

    const fn default_acceptable_error() -> f64 {
        DEFAULT_ACCEPTABLE_ERROR
    }

    /// Checks every invariant generation and assessment rely on.
    pub fn validate(&self) -> Result<(), HomError> {
        self.geometry.validate()?;
        if self.means.len() != self.geometry.rows || self.spreads.len() != self.geometry.cols {
            return Err(HomError::Config(
                ErrorInfo::new(
                    "plan-parameters",
                    "one mean per grid row and one spread per grid column are required",
                )
                .with_context("rows", self.geometry.rows.to_string())
                .with_context("cols", self.geometry.cols.to_string())
                .with_context("means", self.means.len().to_string())
                .with_context("spreads", self.spreads.len().to_string()),
            ));
        }
        if self.means.iter().any(|mean| !mean.is_finite()) {
            return Err(invalid("plan-means", "means must be finite"));
        }
        if self
            .spreads
            .iter()
            .any(|spread| !spread.is_finite() || *spread < 0.0)
        {
            return Err(invalid(
                "plan-spreads",
                "spreads must be finite and non-negative",
            ));
        }
        if self.distributions.is_empty() {
            return Err(invalid(
                "plan-distributions",
                "at least one distribution is required",
            ));
        }
        if self.strict_distributions {
            for distribution in &self.distributions {
                distribution.require_known()?;
            }
        }
        if self.snr_levels.is_empty() || self.snr_levels.iter().any(|snr| !snr.is_finite()) {
            return Err(invalid(
                "plan-snr-levels",
                "SNR levels must be finite and non-empty",
            ));
        }
        let mut stems = BTreeSet::new();
        for combination in self.combinations() {
            let stem = artifact_stem(combination.distribution, combination.snr_db);
            if !stems.insert(stem.clone()) {
                return Err(HomError::Config(
                    ErrorInfo::new(
                        "plan-duplicate-combination",
                        "two combinations map to the same artifact name",
                    )
                    .with_context("stem", stem)
                    .with_hint("SNR levels are truncated to integers in file names"),
                ));
            }
        }
        if self.acceptable_error.is_nan() || self.acceptable_error <= 0.0 {
            return Err(invalid(
                "plan-threshold",
                "acceptable error threshold must be positive",
            ));
        }
        if self.concurrency == 0 {
            return Err(invalid("plan-concurrency", "concurrency must be at least 1"));
        }
        Ok(())
    }

    /// Cartesian product of distributions and SNR levels, distribution-major.
    pub fn combinations(&self) -> Vec<Combination> {
        self.distributions
            .iter()
            .flat_map(|&distribution| {
                self.snr_levels
                    .iter()
                    .map(move |&snr_db| (distribution, snr_db))
            })
            .enumerate()
            .map(|(index, (distribution, snr_db))| Combination {
                index,
                distribution,
                snr_db,
            })
            .collect()
    }

    /// Collage parameters for `distribution` under this plan's grid.
    pub fn collage_spec(&self, distribution: Distribution) -> CollageSpec {
        CollageSpec {
            distribution,
            means: self.means.clone(),
            spreads: self.spreads.clone(),
            geometry: self.geometry,
        }
    }

    /// Noisy generation options at `snr_db` with the plan's noise offset.
    pub fn generation_options(&self, snr_db: f64) -> GenerationOptions {
        GenerationOptions {
            noise: NoiseSpec::new(snr_db).with_offset(self.noise_offset),
            inject_noise: true,
        }
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            distributions: Self::default_distributions(),
            snr_levels: Self::default_snr_levels(),
            seed: Self::default_seed(),
            geometry: GridGeometry::default(),
            means: Self::default_means(),
            spreads: Self::default_spreads(),
            noise_offset: 0.0,
            stream_policy: StreamPolicy::default(),
            concurrency: Self::default_concurrency(),
            acceptable_error: Self::default_acceptable_error(),
            strict_distributions: false,
        }
    }
}

/// Loads and validates a plan, picking YAML or JSON from the file extension.
pub fn load_plan(path: &Path) -> Result<SweepPlan, HomError> {
    let bytes = fs::read(path).map_err(|err| {
        HomError::Io(
            ErrorInfo::new("plan-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let plan: SweepPlan = match extension.as_deref() {
        Some("yaml") | Some("yml") => from_yaml_slice(&bytes)?,
        Some("json") => from_json_slice(&bytes)?,
        _ => {
            return Err(HomError::Config(
                ErrorInfo::new("plan-format", "unrecognised plan file extension")
                    .with_context("path", path.display().to_string())
                    .with_hint("use .yaml, .yml or .json"),
            ))
        }
    };
    plan.validate()?;
    Ok(plan)
}
