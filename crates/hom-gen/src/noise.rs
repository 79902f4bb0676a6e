//! Additive Gaussian noise calibrated to a target SNR.

use hom_core::{ErrorInfo, HomError, RngHandle};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Target SNR and mean offset of the injected noise field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Signal-to-noise ratio in decibels relative to the reference spread.
    pub snr_db: f64,
    /// Mean of the noise field; zero keeps the signal mean in place.
    #[serde(default)]
    pub offset: f64,
}

impl NoiseSpec {
    /// Zero-mean noise at `snr_db`.
    pub fn new(snr_db: f64) -> Self {
        Self {
            snr_db,
            offset: 0.0,
        }
    }

    /// Same SNR with the noise mean shifted by `offset`.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

/// Noise standard deviation realising `snr_db` for a signal of spread `signal_spread`.
///
/// `noise_power = signal_spread² / 10^(snr_db/10)`.
pub fn noise_stddev(signal_spread: f64, snr_db: f64) -> f64 {
    let signal_power = signal_spread * signal_spread;
    let snr_linear = 10f64.powf(snr_db / 10.0);
    (signal_power / snr_linear).sqrt()
}

fn noise_distribution(signal_spread: f64, spec: &NoiseSpec) -> Result<Normal<f64>, HomError> {
    let stddev = noise_stddev(signal_spread, spec.snr_db);
    if spec.snr_db.is_nan() || !spec.offset.is_finite() || !stddev.is_finite() {
        return Err(HomError::Config(
            ErrorInfo::new("noise-parameter", "noise parameters must be finite")
                .with_context("snr_db", spec.snr_db.to_string())
                .with_context("offset", spec.offset.to_string())
                .with_context("signal_spread", signal_spread.to_string()),
        ));
    }
    Normal::new(spec.offset, stddev).map_err(|err| {
        HomError::Config(
            ErrorInfo::new("noise-parameter", err.to_string())
                .with_context("stddev", stddev.to_string()),
        )
    })
}

/// Adds calibrated noise to `signal` in place, drawing in row-major order.
///
/// The SNR is taken relative to the parametric `signal_spread`, not to the
/// spread the samples actually realise, so small regions can deviate from the
/// nominal SNR.
pub fn apply_calibrated_noise(
    mut signal: ArrayViewMut2<'_, f32>,
    signal_spread: f64,
    spec: &NoiseSpec,
    rng: &mut RngHandle,
) -> Result<(), HomError> {
    let normal = noise_distribution(signal_spread, spec)?;
    for pixel in signal.iter_mut() {
        *pixel = (f64::from(*pixel) + normal.sample(rng)) as f32;
    }
    Ok(())
}

/// Returns `signal` plus a calibrated noise field of the same shape.
pub fn add_calibrated_noise(
    signal: ArrayView2<'_, f32>,
    signal_spread: f64,
    spec: &NoiseSpec,
    rng: &mut RngHandle,
) -> Result<Array2<f32>, HomError> {
    let mut noisy = signal.to_owned();
    apply_calibrated_noise(noisy.view_mut(), signal_spread, spec, rng)?;
    Ok(noisy)
}
