use std::fs;
use std::path::Path;

use hom_core::{Distribution, ErrorInfo, HomError};
use serde::{Deserialize, Serialize};

use crate::serde::{from_json_slice, to_pretty_json_bytes};

/// Settings of a single-combination generation run.
///
/// Stored as JSON; missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Distribution family.
    #[serde(default = "GeneratorConfig::default_distribution")]
    pub distribution: Distribution,
    /// Nominal SNR in decibels.
    #[serde(default = "GeneratorConfig::default_snr_db")]
    pub snr_db: f64,
    /// Seed of the single random stream.
    #[serde(default)]
    pub seed: u64,
}

impl GeneratorConfig {
    const fn default_distribution() -> Distribution {
        Distribution::Gaussian
    }

    const fn default_snr_db() -> f64 {
        50.0
    }

    /// Replaces the seed when an override is given.
    pub fn with_seed_override(mut self, seed: Option<u64>) -> Self {
        if let Some(seed) = seed {
            self.seed = seed;
        }
        self
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            distribution: Self::default_distribution(),
            snr_db: Self::default_snr_db(),
            seed: 0,
        }
    }
}

/// Reads a generator config.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, HomError> {
    let bytes = fs::read(path).map_err(|err| {
        HomError::Io(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_json_slice(&bytes)
}

/// Writes the default generator config to `path`.
pub fn write_default_config(path: &Path) -> Result<GeneratorConfig, HomError> {
    let config = GeneratorConfig::default();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| {
            HomError::Io(
                ErrorInfo::new("config-dir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    fs::write(path, to_pretty_json_bytes(&config)?).map_err(|err| {
        HomError::Io(
            ErrorInfo::new("config-write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(config)
}
