#![deny(missing_docs)]
#![doc = "Sweep orchestration for the moment benchmark: plans, artifact layout, raster persistence and export."]

/// Generator configuration for single composites.
pub mod config;
/// Sweep execution and assessment.
pub mod driver;
/// CSV, summary and report export.
pub mod export;
/// Canonical hashing helpers.
pub mod hash;
/// Artifact directory layout and naming.
pub mod layout;
/// Run manifest describing generated artifacts.
pub mod manifest;
/// Sweep plan loading and validation.
pub mod plan;
/// Lossless float raster codec.
pub mod raster;
/// Ground-truth and evaluation document I/O.
pub mod records;
/// Canonical JSON and YAML serde helpers.
pub mod serde;

pub use config::{load_config, write_default_config, GeneratorConfig};
pub use driver::{
    assess_sweep, evaluate_image, generate_single, generate_sweep, run_sweep, SweepAssessment,
    SweepOutcome,
};
pub use export::{
    export_metrics_csv, render_report, write_report, write_summary, AssessmentSummary, DistributionVerdict,
    CSV_HEADER,
};
pub use hash::stable_hash_string;
pub use layout::{artifact_stem, ArtifactLayout};
pub use manifest::{CombinationRecord, RunManifest};
pub use plan::{load_plan, Combination, SweepPlan};
pub use raster::{read_raster, write_raster};
pub use records::{read_evaluation, read_ground_truth, write_evaluation, write_ground_truth};
