//! Sweep orchestration: generate, reload, evaluate, assess and export.

use std::fs;
use std::path::Path;

use hom_core::{
    ErrorInfo, EvaluationRecord, GridGeometry, GroundTruthRecord, HomError, RngHandle,
    StreamPolicy,
};
use hom_eval::{aggregate_across_sweep, compare, evaluate_collage, CollageErrorMetrics};
use hom_gen::{assemble, InclusionMask};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::export::{export_metrics_csv, write_report, write_summary, AssessmentSummary};
use crate::layout::ArtifactLayout;
use crate::manifest::{CombinationRecord, RunManifest};
use crate::plan::{Combination, SweepPlan};
use crate::raster::{read_raster, write_raster};
use crate::records::{read_evaluation, read_ground_truth, write_evaluation, write_ground_truth};

/// Result of assessing the artifacts of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAssessment {
    /// Errors of every assessed combination, in traversal order.
    pub metrics: Vec<CollageErrorMetrics>,
    /// Combinations skipped because an artifact was missing.
    pub skipped: Vec<Combination>,
    /// Aggregated table and verdicts.
    pub summary: AssessmentSummary,
    /// Data rows written to the metrics CSV.
    pub csv_rows: usize,
}

/// Result of a full generate → evaluate → assess run.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// Manifest of the generated artifacts.
    pub manifest: RunManifest,
    /// Number of composites evaluated.
    pub evaluated: usize,
    /// Assessment of the evaluated composites.
    pub assessment: SweepAssessment,
}

fn thread_pool(threads: usize) -> Result<rayon::ThreadPool, HomError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|err| HomError::Config(ErrorInfo::new("thread-pool", err.to_string())))
}

fn ensure_parent(path: &Path) -> Result<(), HomError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|err| {
                HomError::Io(
                    ErrorInfo::new("artifact-dir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })
        }
        _ => Ok(()),
    }
}

fn generate_combination(
    plan: &SweepPlan,
    layout: &ArtifactLayout,
    combination: &Combination,
    rng: &mut RngHandle,
) -> Result<CombinationRecord, HomError> {
    let spec = plan.collage_spec(combination.distribution);
    let options = plan.generation_options(combination.snr_db);
    let (composite, ground_truth) = assemble(&spec, &options, rng)?;
    let image_path = layout.image_path(combination.distribution, combination.snr_db);
    write_raster(&image_path, composite.pixels.view())?;
    write_ground_truth(
        &layout.ground_truth_path(combination.distribution, combination.snr_db),
        &ground_truth,
    )?;
    debug!(
        index = combination.index,
        distribution = %combination.distribution,
        snr_db = combination.snr_db,
        "combination generated"
    );
    Ok(CombinationRecord::new(layout, combination))
}

/// Generates composites and ground truth for every combination of `plan`.
///
/// Under [`StreamPolicy::Sequential`] one stream seeded with the plan seed is
/// consumed in traversal order. Under [`StreamPolicy::PerCombination`] each
/// combination draws from its own substream and the work is spread over
/// `plan.concurrency` threads.
pub fn generate_sweep(plan: &SweepPlan, layout: &ArtifactLayout) -> Result<RunManifest, HomError> {
    plan.validate()?;
    layout.ensure_dirs()?;
    let combinations = plan.combinations();
    info!(
        combinations = combinations.len(),
        seed = plan.seed,
        policy = ?plan.stream_policy,
        root = %layout.root().display(),
        "generating sweep"
    );

    let records = match plan.stream_policy {
        StreamPolicy::Sequential => {
            let mut rng = RngHandle::from_seed(plan.seed);
            combinations
                .iter()
                .map(|combination| generate_combination(plan, layout, combination, &mut rng))
                .collect::<Result<Vec<_>, HomError>>()?
        }
        StreamPolicy::PerCombination => {
            let pool = thread_pool(plan.concurrency)?;
            let results: Result<Vec<_>, HomError> = pool.install(|| {
                combinations
                    .par_iter()
                    .map(|combination| {
                        let mut rng = RngHandle::substream(plan.seed, combination.index as u64);
                        generate_combination(plan, layout, combination, &mut rng)
                    })
                    .collect()
            });
            let mut ordered = results?;
            ordered.sort_by_key(|record| record.index);
            ordered
        }
    };

    let manifest = RunManifest::new(plan, records)?;
    manifest.write(&layout.manifest_path())?;
    Ok(manifest)
}

/// Generates one composite from a generator config.
///
/// The grid parameters come from `plan`; distribution, SNR and seed come from
/// `config`.
pub fn generate_single(
    config: &GeneratorConfig,
    plan: &SweepPlan,
    image_path: &Path,
    ground_truth_path: &Path,
) -> Result<GroundTruthRecord, HomError> {
    if plan.strict_distributions {
        config.distribution.require_known()?;
    }
    let spec = plan.collage_spec(config.distribution);
    let options = plan.generation_options(config.snr_db);
    let mut rng = RngHandle::from_seed(config.seed);
    let (composite, ground_truth) = assemble(&spec, &options, &mut rng)?;
    ensure_parent(image_path)?;
    write_raster(image_path, composite.pixels.view())?;
    write_ground_truth(ground_truth_path, &ground_truth)?;
    info!(
        distribution = %config.distribution,
        snr_db = config.snr_db,
        seed = config.seed,
        image = %image_path.display(),
        "composite generated"
    );
    Ok(ground_truth)
}

fn evaluate_with_mask(
    image_path: &Path,
    evaluation_path: &Path,
    mask: &InclusionMask,
) -> Result<EvaluationRecord, HomError> {
    let pixels = read_raster(image_path)?;
    let record = evaluate_collage(pixels.view(), mask.view(), mask.geometry())?;
    write_evaluation(evaluation_path, &record)?;
    debug!(image = %image_path.display(), cells = record.cells.len(), "composite evaluated");
    Ok(record)
}

/// Reloads a composite, estimates per-cell moments and writes the evaluation.
pub fn evaluate_image(
    image_path: &Path,
    evaluation_path: &Path,
    geometry: &GridGeometry,
) -> Result<EvaluationRecord, HomError> {
    let mask = InclusionMask::from_geometry(geometry)?;
    evaluate_with_mask(image_path, evaluation_path, &mask)
}

/// Compares ground truth with evaluations for every combination of `plan`
/// and exports the aggregate.
///
/// Combinations with a missing document are logged and skipped. Malformed
/// documents and cell mismatches are errors.
pub fn assess_sweep(plan: &SweepPlan, layout: &ArtifactLayout) -> Result<SweepAssessment, HomError> {
    plan.validate()?;
    let mut metrics = Vec::new();
    let mut skipped = Vec::new();
    for combination in plan.combinations() {
        let (distribution, snr_db) = (combination.distribution, combination.snr_db);
        let truth_path = layout.ground_truth_path(distribution, snr_db);
        let evaluation_path = layout.evaluation_path(distribution, snr_db);
        if let Some(missing) = [&truth_path, &evaluation_path]
            .into_iter()
            .find(|path| !path.exists())
        {
            warn!(
                distribution = %distribution,
                snr_db,
                missing = %missing.display(),
                "artifact missing, skipping combination"
            );
            skipped.push(combination);
            continue;
        }
        let truth = read_ground_truth(&truth_path)?;
        let evaluation = read_evaluation(&evaluation_path)?;
        metrics.push(CollageErrorMetrics {
            distribution,
            snr_db,
            metrics: compare(&truth, &evaluation)?,
        });
    }

    let table = aggregate_across_sweep(&plan.distributions, &plan.snr_levels, &metrics);
    let summary = AssessmentSummary::from_table(table, plan.acceptable_error);
    let csv_rows = export_metrics_csv(&layout.metrics_csv_path(), &metrics);
    write_summary(&layout.summary_path(), &summary);
    write_report(&layout.report_path(), &summary);
    info!(
        assessed = metrics.len(),
        skipped = skipped.len(),
        "sweep assessed"
    );
    Ok(SweepAssessment {
        metrics,
        skipped,
        summary,
        csv_rows,
    })
}

/// Runs a complete sweep: generation, reload and evaluation, assessment and export.
///
/// The inclusion mask is built once and shared by every evaluation.
pub fn run_sweep(plan: &SweepPlan, layout: &ArtifactLayout) -> Result<SweepOutcome, HomError> {
    let manifest = generate_sweep(plan, layout)?;
    let mask = InclusionMask::from_geometry(&plan.geometry)?;
    let pool = thread_pool(plan.concurrency)?;
    let evaluated: Result<Vec<_>, HomError> = pool.install(|| {
        manifest
            .combinations
            .par_iter()
            .map(|record| {
                evaluate_with_mask(
                    &layout.image_path(record.distribution, record.snr_db),
                    &layout.evaluation_path(record.distribution, record.snr_db),
                    &mask,
                )
            })
            .collect()
    });
    let evaluated = evaluated?.len();
    let assessment = assess_sweep(plan, layout)?;
    Ok(SweepOutcome {
        manifest,
        evaluated,
        assessment,
    })
}
