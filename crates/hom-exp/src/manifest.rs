use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use hom_core::{Distribution, ErrorInfo, HomError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::layout::ArtifactLayout;
use crate::plan::{Combination, SweepPlan};
use crate::serde::{from_json_slice, to_canonical_json_bytes};

/// Artifacts generated for one combination, relative to the layout root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRecord {
    /// Position in the sweep traversal.
    pub index: usize,
    /// Distribution family.
    pub distribution: Distribution,
    /// Nominal SNR in decibels.
    pub snr_db: f64,
    /// Composite raster path.
    pub image: String,
    /// Ground-truth document path.
    pub ground_truth: String,
}

impl CombinationRecord {
    /// Record for `combination` under `layout`.
    pub fn new(layout: &ArtifactLayout, combination: &Combination) -> Self {
        let (distribution, snr_db) = (combination.distribution, combination.snr_db);
        Self {
            index: combination.index,
            distribution,
            snr_db,
            image: layout.relative(&layout.image_path(distribution, snr_db)),
            ground_truth: layout.relative(&layout.ground_truth_path(distribution, snr_db)),
        }
    }
}

/// Manifest written at the root of every generated sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Schema version of this document.
    pub schema_version: SchemaVersion,
    /// Plan hash, seed and tooling.
    pub provenance: RunProvenance,
    /// Generated combinations in traversal order.
    pub combinations: Vec<CombinationRecord>,
}

impl RunManifest {
    /// Manifest for `plan` stamped with the current time.
    pub fn new(plan: &SweepPlan, combinations: Vec<CombinationRecord>) -> Result<Self, HomError> {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: RunProvenance {
                plan_hash: stable_hash_string(plan)?,
                seed: plan.seed,
                stream_policy: plan.stream_policy,
                created_at: Utc::now().to_rfc3339(),
                tool_versions,
            },
            combinations,
        })
    }

    /// Writes the manifest as canonical JSON.
    pub fn write(&self, path: &Path) -> Result<(), HomError> {
        fs::write(path, to_canonical_json_bytes(self)?).map_err(|err| {
            HomError::Io(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Reads a manifest.
    pub fn read(path: &Path) -> Result<Self, HomError> {
        let bytes = fs::read(path).map_err(|err| {
            HomError::Io(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_json_slice(&bytes)
    }
}
