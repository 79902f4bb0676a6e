//! Masked population moments.
//!
//! Only pixels whose mask value is non-zero contribute. With `n` active
//! pixels, mean `μ` and population standard deviation `σ` (floored at
//! [`STD_FLOOR`]):
//!
//! * skewness = `(Σ(x-μ)³ / n) / σ³`
//! * excess kurtosis = `(Σ(x-μ)⁴ / n) / σ⁴ - 3`
//!
//! No small-sample bias correction is applied.

use hom_core::{ErrorInfo, HomError};
use ndarray::{ArrayView2, Zip};
use serde::{Deserialize, Serialize};

/// Lower bound applied to the standard deviation before standardizing.
pub const STD_FLOOR: f64 = 1e-10;

/// Moments of the active pixels of an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskedMoments {
    /// Number of active pixels.
    pub count: usize,
    /// Mean over active pixels.
    pub mean: f64,
    /// Population standard deviation over active pixels, floored at [`STD_FLOOR`].
    pub std_dev: f64,
    /// Population skewness.
    pub skewness: f64,
    /// Population excess kurtosis.
    pub kurtosis: f64,
}

fn check_shapes<T>(values: &ArrayView2<'_, T>, mask: &ArrayView2<'_, u8>) -> Result<(), HomError> {
    if values.dim() != mask.dim() {
        let (vh, vw) = values.dim();
        let (mh, mw) = mask.dim();
        return Err(HomError::Precondition(
            ErrorInfo::new("mask-shape", "mask and image dimensions differ")
                .with_context("image", format!("{vh}x{vw}"))
                .with_context("mask", format!("{mh}x{mw}")),
        ));
    }
    Ok(())
}

fn active_values<'a, T>(
    values: &'a ArrayView2<'_, T>,
    mask: &'a ArrayView2<'_, u8>,
) -> impl Iterator<Item = f64> + 'a
where
    T: Copy + Into<f64>,
{
    values
        .iter()
        .zip(mask.iter())
        .filter(|(_, flag)| **flag != 0)
        .map(|(&value, _)| value.into())
}

/// Mean of the active pixels.
pub fn masked_mean<T>(values: ArrayView2<'_, T>, mask: ArrayView2<'_, u8>) -> Result<f64, HomError>
where
    T: Copy + Into<f64>,
{
    check_shapes(&values, &mask)?;
    let mut count = 0usize;
    let mut sum = 0.0;
    Zip::from(&values).and(&mask).for_each(|&value, &flag| {
        if flag != 0 {
            count += 1;
            sum += value.into();
        }
    });
    if count == 0 {
        return Err(empty_mask());
    }
    Ok(sum / count as f64)
}

fn empty_mask() -> HomError {
    HomError::precondition("empty-mask", "mask selects no pixels")
}

/// Computes mean, spread, skewness and excess kurtosis over the active pixels.
pub fn masked_moments<T>(
    values: ArrayView2<'_, T>,
    mask: ArrayView2<'_, u8>,
) -> Result<MaskedMoments, HomError>
where
    T: Copy + Into<f64>,
{
    check_shapes(&values, &mask)?;

    let mut count = 0usize;
    let mut sum = 0.0;
    for value in active_values(&values, &mask) {
        count += 1;
        sum += value;
    }
    if count == 0 {
        return Err(empty_mask());
    }
    let n = count as f64;
    let mean = sum / n;

    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for value in active_values(&values, &mask) {
        let diff = value - mean;
        let sq = diff * diff;
        m2 += sq;
        m3 += sq * diff;
        m4 += sq * sq;
    }
    let std_dev = (m2 / n).sqrt().max(STD_FLOOR);
    let skewness = (m3 / n) / std_dev.powi(3);
    let kurtosis = (m4 / n) / std_dev.powi(4) - 3.0;

    Ok(MaskedMoments {
        count,
        mean,
        std_dev,
        skewness,
        kurtosis,
    })
}

/// Population skewness of the active pixels.
pub fn skewness<T>(values: ArrayView2<'_, T>, mask: ArrayView2<'_, u8>) -> Result<f64, HomError>
where
    T: Copy + Into<f64>,
{
    masked_moments(values, mask).map(|moments| moments.skewness)
}

/// Population excess kurtosis of the active pixels.
pub fn kurtosis<T>(values: ArrayView2<'_, T>, mask: ArrayView2<'_, u8>) -> Result<f64, HomError>
where
    T: Copy + Into<f64>,
{
    masked_moments(values, mask).map(|moments| moments.kurtosis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn matches_reference_values() {
        let values = array![[2.0f64, 8.0, 0.0, 4.0], [1.0, 9.0, 9.0, 0.0]];
        let mask = Array2::<u8>::from_elem((2, 4), 255);
        let moments = masked_moments(values.view(), mask.view()).unwrap();
        assert_eq!(moments.count, 8);
        assert!((moments.skewness - 0.2650554122698573).abs() < 1e-12);
        assert!((moments.kurtosis - -1.6660010752838508).abs() < 1e-12);
    }

    #[test]
    fn constant_input_uses_floor() {
        let values = Array2::<f32>::from_elem((3, 3), 7.0);
        let mask = Array2::<u8>::from_elem((3, 3), 1);
        let moments = masked_moments(values.view(), mask.view()).unwrap();
        assert_eq!(moments.std_dev, STD_FLOOR);
        assert_eq!(moments.skewness, 0.0);
        assert_eq!(moments.kurtosis, -3.0);
    }
}
