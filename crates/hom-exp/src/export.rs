//! Export of aggregated errors to CSV, JSON and Markdown.
//!
//! Export failures never abort a sweep: they are logged and reported through
//! the return value.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use csv::WriterBuilder;
use hom_core::Distribution;
use hom_eval::{AcceptableLevel, BandSummary, CollageErrorMetrics, Moment, SweepTable};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::serde::to_pretty_json_bytes;

/// Header row of the metrics CSV.
pub const CSV_HEADER: [&str; 4] = [
    "Distribution",
    "SNR_dB",
    "MeanSkewnessError",
    "MeanKurtosisError",
];

/// Levels considered by [`BandSummary`] at each end of the SNR range.
const BAND_WINDOW: usize = 3;

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Writes one CSV row per combination, in the order given.
///
/// Returns the number of data rows written; `0` when the file cannot be opened.
pub fn export_metrics_csv(path: &Path, metrics: &[CollageErrorMetrics]) -> usize {
    let file = match ensure_parent(path).and_then(|_| File::create(path)) {
        Ok(file) => file,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot open metrics CSV");
            return 0;
        }
    };
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    if let Err(err) = writer.write_record(CSV_HEADER) {
        error!(path = %path.display(), error = %err, "cannot write metrics CSV header");
        return 0;
    }
    let mut written = 0;
    for entry in metrics {
        let record = [
            entry.distribution.id().to_string(),
            format!("{:.6}", entry.snr_db),
            format!("{:.6}", entry.metrics.mean_skewness_error),
            format!("{:.6}", entry.metrics.mean_kurtosis_error),
        ];
        if let Err(err) = writer.write_record(&record) {
            error!(path = %path.display(), error = %err, "cannot write metrics CSV row");
            return written;
        }
        written += 1;
    }
    if let Err(err) = writer.flush() {
        error!(path = %path.display(), error = %err, "cannot flush metrics CSV");
    }
    info!(path = %path.display(), rows = written, "metrics CSV written");
    written
}

/// Threshold crossings and band extremes of one distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionVerdict {
    /// Distribution family.
    pub distribution: Distribution,
    /// First SNR level with acceptable skewness error.
    pub first_acceptable_skewness: Option<AcceptableLevel>,
    /// First SNR level with acceptable kurtosis error.
    pub first_acceptable_kurtosis: Option<AcceptableLevel>,
    /// Error extremes at the noisy and clean ends of the sweep.
    pub bands: BandSummary,
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    /// Threshold used by the first-acceptable queries.
    pub acceptable_error: f64,
    /// Mean errors by distribution and SNR.
    pub table: SweepTable,
    /// Per-distribution verdicts, in sweep order.
    pub verdicts: Vec<DistributionVerdict>,
}

impl AssessmentSummary {
    /// Derives verdicts for every series of `table`.
    pub fn from_table(table: SweepTable, acceptable_error: f64) -> Self {
        let verdicts = table
            .series
            .iter()
            .map(|series| DistributionVerdict {
                distribution: series.distribution,
                first_acceptable_skewness: series
                    .first_acceptable(Moment::Skewness, acceptable_error),
                first_acceptable_kurtosis: series
                    .first_acceptable(Moment::Kurtosis, acceptable_error),
                bands: series.band_summary(BAND_WINDOW),
            })
            .collect();
        Self {
            acceptable_error,
            table,
            verdicts,
        }
    }
}

/// Writes `summary.json`. Returns false when nothing was written.
pub fn write_summary(path: &Path, summary: &AssessmentSummary) -> bool {
    let bytes = match to_pretty_json_bytes(summary) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot serialize summary");
            return false;
        }
    };
    match ensure_parent(path).and_then(|_| fs::write(path, bytes)) {
        Ok(()) => true,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot write summary");
            false
        }
    }
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |value| format!("{value:.6}"))
}

fn level(value: Option<AcceptableLevel>) -> String {
    value.map_or_else(
        || "not reached".to_string(),
        |level| format!("{} dB", level.snr_db),
    )
}

/// Renders the summary as a Markdown report.
pub fn render_report(summary: &AssessmentSummary) -> String {
    let mut lines = vec![
        "# Moment estimator robustness".to_string(),
        String::new(),
        format!(
            "Acceptable mean relative error: {}",
            summary.acceptable_error
        ),
        String::new(),
        "| Distribution | SNR (dB) | Skewness error | Kurtosis error |".to_string(),
        "|---|---|---|---|".to_string(),
    ];
    for series in &summary.table.series {
        lines.extend(series.snr_levels.iter().enumerate().map(|(idx, snr)| {
            format!(
                "| {} | {} | {} | {} |",
                series.distribution,
                snr,
                cell(series.skewness_errors[idx]),
                cell(series.kurtosis_errors[idx]),
            )
        }));
    }
    lines.extend([
        String::new(),
        "## First acceptable SNR".to_string(),
        String::new(),
        "| Distribution | Skewness | Kurtosis |".to_string(),
        "|---|---|---|".to_string(),
    ]);
    lines.extend(summary.verdicts.iter().map(|verdict| {
        format!(
            "| {} | {} | {} |",
            verdict.distribution,
            level(verdict.first_acceptable_skewness),
            level(verdict.first_acceptable_kurtosis),
        )
    }));
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes `report.md`. Returns false when nothing was written.
pub fn write_report(path: &Path, summary: &AssessmentSummary) -> bool {
    match ensure_parent(path).and_then(|_| fs::write(path, render_report(summary))) {
        Ok(()) => true,
        Err(err) => {
            error!(path = %path.display(), error = %err, "cannot write report");
            false
        }
    }
}
