//! Error of evaluated moments against ground truth, per cell and across a sweep.

use std::collections::{BTreeMap, BTreeSet};

use hom_core::{
    CellPosition, CellTruth, Distribution, ErrorInfo, EvaluationRecord, GroundTruthRecord,
    HomError,
};
use serde::{Deserialize, Serialize};

/// Ground-truth magnitude below which the absolute error is reported instead.
pub const ZERO_TRUTH_EPSILON: f64 = 1e-6;

/// Mean error below which an SNR level counts as acceptable.
pub const DEFAULT_ACCEPTABLE_ERROR: f64 = 0.05;

/// Relative error of `evaluated` against `ground_truth`.
///
/// Falls back to `|evaluated|` when `|ground_truth| < ZERO_TRUTH_EPSILON`,
/// where the relative error is undefined.
pub fn relative_error(ground_truth: f64, evaluated: f64) -> f64 {
    if ground_truth.abs() < ZERO_TRUTH_EPSILON {
        return evaluated.abs();
    }
    ((evaluated - ground_truth) / ground_truth).abs()
}

/// Per-cell errors of one composite and their arithmetic means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Mean skewness error over all cells.
    pub mean_skewness_error: f64,
    /// Mean kurtosis error over all cells.
    pub mean_kurtosis_error: f64,
    /// Skewness error per cell, in evaluation order.
    pub skewness_errors: Vec<f64>,
    /// Kurtosis error per cell, in evaluation order.
    pub kurtosis_errors: Vec<f64>,
}

/// Compares an evaluation with its ground truth, matching cells by `(row, col)`.
///
/// Differing cell counts, duplicate or unmatched positions and empty records
/// are precondition violations.
pub fn compare(
    ground_truth: &GroundTruthRecord,
    evaluation: &EvaluationRecord,
) -> Result<ErrorMetrics, HomError> {
    if ground_truth.cells.len() != evaluation.cells.len() {
        return Err(HomError::Precondition(
            ErrorInfo::new("cell-count-mismatch", "records describe different grids")
                .with_context("ground_truth", ground_truth.cells.len().to_string())
                .with_context("evaluation", evaluation.cells.len().to_string()),
        ));
    }
    if evaluation.cells.is_empty() {
        return Err(HomError::precondition("no-cells", "records contain no cells"));
    }

    let mut truth_by_position: BTreeMap<CellPosition, &CellTruth> = BTreeMap::new();
    for cell in &ground_truth.cells {
        if truth_by_position.insert(cell.position(), cell).is_some() {
            return Err(position_error("duplicate-cell", cell.position()));
        }
    }

    let mut skewness_errors = Vec::with_capacity(evaluation.cells.len());
    let mut kurtosis_errors = Vec::with_capacity(evaluation.cells.len());
    let mut consumed = BTreeSet::new();
    for cell in &evaluation.cells {
        if !consumed.insert(cell.position()) {
            return Err(position_error("duplicate-cell", cell.position()));
        }
        let truth = truth_by_position
            .get(&cell.position())
            .ok_or_else(|| position_error("unmatched-cell", cell.position()))?;
        skewness_errors.push(relative_error(
            truth.theoretical_skewness,
            cell.evaluated_skewness,
        ));
        kurtosis_errors.push(relative_error(
            truth.theoretical_kurtosis,
            cell.evaluated_kurtosis,
        ));
    }

    Ok(ErrorMetrics {
        mean_skewness_error: mean(&skewness_errors),
        mean_kurtosis_error: mean(&kurtosis_errors),
        skewness_errors,
        kurtosis_errors,
    })
}

fn position_error(code: &str, position: CellPosition) -> HomError {
    HomError::Precondition(
        ErrorInfo::new(code, "cell positions do not line up between records")
            .with_context("row", position.row.to_string())
            .with_context("col", position.col.to_string()),
    )
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// [`ErrorMetrics`] tagged with the sweep combination it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageErrorMetrics {
    /// Distribution family of the composite.
    pub distribution: Distribution,
    /// Nominal SNR of the composite.
    pub snr_db: f64,
    /// Errors of the composite.
    #[serde(flatten)]
    pub metrics: ErrorMetrics,
}

/// Which estimated moment a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Moment {
    /// Third standardized moment.
    Skewness,
    /// Excess kurtosis.
    Kurtosis,
}

/// First SNR level whose mean error dropped below the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptableLevel {
    /// Position of the level in the sweep's SNR order.
    pub index: usize,
    /// SNR of that level.
    pub snr_db: f64,
}

/// Extremes of the mean error at both ends of the SNR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    /// Largest skewness error among the first `window` levels.
    pub low_snr_peak_skewness: Option<f64>,
    /// Largest kurtosis error among the first `window` levels.
    pub low_snr_peak_kurtosis: Option<f64>,
    /// Smallest skewness error among the last `window` levels.
    pub high_snr_floor_skewness: Option<f64>,
    /// Smallest kurtosis error among the last `window` levels.
    pub high_snr_floor_kurtosis: Option<f64>,
}

/// Mean errors of one distribution across the SNR levels of a sweep.
///
/// Levels without a result hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSeries {
    /// Distribution family.
    pub distribution: Distribution,
    /// SNR levels in sweep order.
    pub snr_levels: Vec<f64>,
    /// Mean skewness error per level.
    pub skewness_errors: Vec<Option<f64>>,
    /// Mean kurtosis error per level.
    pub kurtosis_errors: Vec<Option<f64>>,
}

impl DistributionSeries {
    /// Error sequence for `moment`.
    pub fn errors(&self, moment: Moment) -> &[Option<f64>] {
        match moment {
            Moment::Skewness => &self.skewness_errors,
            Moment::Kurtosis => &self.kurtosis_errors,
        }
    }

    /// First level, in sweep order, whose error is strictly below `threshold`.
    pub fn first_acceptable(&self, moment: Moment, threshold: f64) -> Option<AcceptableLevel> {
        self.errors(moment)
            .iter()
            .position(|error| matches!(error, Some(value) if *value < threshold))
            .map(|index| AcceptableLevel {
                index,
                snr_db: self.snr_levels[index],
            })
    }

    /// Peak error over the first `window` levels and floor over the last `window`.
    pub fn band_summary(&self, window: usize) -> BandSummary {
        let head = |errors: &[Option<f64>]| {
            errors
                .iter()
                .take(window)
                .flatten()
                .copied()
                .reduce(f64::max)
        };
        let tail = |errors: &[Option<f64>]| {
            let start = errors.len().saturating_sub(window);
            errors[start..].iter().flatten().copied().reduce(f64::min)
        };
        BandSummary {
            low_snr_peak_skewness: head(self.errors(Moment::Skewness)),
            low_snr_peak_kurtosis: head(self.errors(Moment::Kurtosis)),
            high_snr_floor_skewness: tail(self.errors(Moment::Skewness)),
            high_snr_floor_kurtosis: tail(self.errors(Moment::Kurtosis)),
        }
    }
}

/// Mean errors organized by distribution and SNR, in caller order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepTable {
    /// SNR levels in sweep order.
    pub snr_levels: Vec<f64>,
    /// One series per distribution, in sweep order.
    pub series: Vec<DistributionSeries>,
}

impl SweepTable {
    /// Series of `distribution`, if it was part of the sweep.
    pub fn series_for(&self, distribution: Distribution) -> Option<&DistributionSeries> {
        self.series
            .iter()
            .find(|series| series.distribution == distribution)
    }

    /// First acceptable level of `moment` for `distribution`.
    pub fn first_acceptable(
        &self,
        distribution: Distribution,
        moment: Moment,
        threshold: f64,
    ) -> Option<AcceptableLevel> {
        self.series_for(distribution)?
            .first_acceptable(moment, threshold)
    }
}

/// Arranges per-combination metrics into a [`SweepTable`].
///
/// Distributions and SNR levels keep the order given. Metrics whose
/// combination is not part of the sweep are ignored; combinations without
/// metrics stay `None`.
pub fn aggregate_across_sweep(
    distributions: &[Distribution],
    snr_levels: &[f64],
    metrics: &[CollageErrorMetrics],
) -> SweepTable {
    let mut series: Vec<DistributionSeries> = distributions
        .iter()
        .map(|&distribution| DistributionSeries {
            distribution,
            snr_levels: snr_levels.to_vec(),
            skewness_errors: vec![None; snr_levels.len()],
            kurtosis_errors: vec![None; snr_levels.len()],
        })
        .collect();

    for entry in metrics {
        let Some(level) = snr_levels.iter().position(|snr| *snr == entry.snr_db) else {
            continue;
        };
        let Some(target) = series
            .iter_mut()
            .find(|series| series.distribution == entry.distribution)
        else {
            continue;
        };
        target.skewness_errors[level] = Some(entry.metrics.mean_skewness_error);
        target.kurtosis_errors[level] = Some(entry.metrics.mean_kurtosis_error);
    }

    SweepTable {
        snr_levels: snr_levels.to_vec(),
        series,
    }
}
