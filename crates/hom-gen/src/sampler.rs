//! Raw sample generation for the supported distribution families.

use hom_core::{Distribution, ErrorInfo, HomError, RngHandle};
use ndarray::Array2;
use rand_distr::{Distribution as _, Exp, Normal, Uniform};
use tracing::debug;

fn invalid_parameter(
    distribution: Distribution,
    mean: f64,
    spread: f64,
    message: &str,
) -> HomError {
    HomError::Config(
        ErrorInfo::new("sampler-parameter", message)
            .with_context("distribution", distribution.to_string())
            .with_context("mean", mean.to_string())
            .with_context("spread", spread.to_string()),
    )
}

/// Draws a `(height, width)` array of samples from `distribution`.
///
/// * Gaussian: `Normal(mean, spread)`.
/// * Uniform: `[mean - √3·spread, mean + √3·spread]`, so the variance is `spread²`.
/// * Exponential: rate `1/mean`. `spread` is accepted and ignored.
/// * Unknown ids: an all-zero array, no draws are consumed.
///
/// Values are drawn in row-major order from `rng`, so identical seeds and call
/// order reproduce identical arrays.
pub fn sample(
    distribution: Distribution,
    mean: f64,
    spread: f64,
    shape: (usize, usize),
    rng: &mut RngHandle,
) -> Result<Array2<f64>, HomError> {
    if !mean.is_finite() {
        return Err(invalid_parameter(distribution, mean, spread, "mean must be finite"));
    }
    match distribution {
        Distribution::Gaussian => {
            if !spread.is_finite() || spread < 0.0 {
                return Err(invalid_parameter(
                    distribution,
                    mean,
                    spread,
                    "spread must be finite and non-negative",
                ));
            }
            let normal = Normal::new(mean, spread).map_err(|err| {
                invalid_parameter(distribution, mean, spread, &err.to_string())
            })?;
            Ok(Array2::from_shape_fn(shape, |_| normal.sample(rng)))
        }
        Distribution::Uniform => {
            if !spread.is_finite() || spread < 0.0 {
                return Err(invalid_parameter(
                    distribution,
                    mean,
                    spread,
                    "spread must be finite and non-negative",
                ));
            }
            let half_width = 3.0_f64.sqrt() * spread;
            let (low, high) = (mean - half_width, mean + half_width);
            if !low.is_finite() || !high.is_finite() {
                return Err(invalid_parameter(
                    distribution,
                    mean,
                    spread,
                    "uniform bounds overflow",
                ));
            }
            let uniform = Uniform::new_inclusive(low, high);
            Ok(Array2::from_shape_fn(shape, |_| uniform.sample(rng)))
        }
        Distribution::Exponential => {
            if mean <= 0.0 {
                return Err(invalid_parameter(
                    distribution,
                    mean,
                    spread,
                    "exponential cells need a positive mean",
                ));
            }
            let exp = Exp::new(1.0 / mean).map_err(|err| {
                invalid_parameter(distribution, mean, spread, &err.to_string())
            })?;
            Ok(Array2::from_shape_fn(shape, |_| exp.sample(rng)))
        }
        Distribution::Unknown(id) => {
            debug!(distribution = id, "unknown distribution, emitting zero samples");
            Ok(Array2::zeros(shape))
        }
    }
}

/// Standard deviation of the generating distribution as parameterized.
///
/// This is the spread noise is calibrated against. It equals `spread` for every
/// family except Exponential, whose standard deviation is `1/rate = mean`.
pub fn reference_spread(distribution: Distribution, mean: f64, spread: f64) -> f64 {
    match distribution {
        Distribution::Exponential => mean,
        _ => spread,
    }
}
