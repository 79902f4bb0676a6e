use hom_core::HomError;
use hom_eval::{kurtosis, masked_mean, masked_moments, skewness};
use ndarray::Array2;
use proptest::prelude::*;

fn image_and_mask(values: &[f32], flags: &[bool], width: usize) -> (Array2<f32>, Array2<u8>) {
    let height = values.len() / width;
    let image = Array2::from_shape_vec((height, width), values[..height * width].to_vec()).unwrap();
    let mask = Array2::from_shape_vec(
        (height, width),
        flags[..height * width]
            .iter()
            .map(|&on| if on { 255 } else { 0 })
            .collect(),
    )
    .unwrap();
    (image, mask)
}

proptest! {
    #[test]
    fn masked_out_pixels_do_not_matter(
        values in prop::collection::vec(-1000.0f32..1000.0, 64),
        flags in prop::collection::vec(any::<bool>(), 64),
        extreme in prop_oneof![Just(1.0e30f32), Just(-1.0e30f32), Just(0.0f32)],
    ) {
        let (image, mask) = image_and_mask(&values, &flags, 8);
        prop_assume!(mask.iter().any(|&m| m != 0));
        let mut polluted = image.clone();
        polluted.zip_mut_with(&mask, |value, &flag| {
            if flag == 0 {
                *value = extreme;
            }
        });
        let clean = masked_moments(image.view(), mask.view()).unwrap();
        let dirty = masked_moments(polluted.view(), mask.view()).unwrap();
        prop_assert_eq!(clean, dirty);
    }

    #[test]
    fn masked_mean_matches_filtered_mean(
        values in prop::collection::vec(-1000.0f32..1000.0, 48),
        flags in prop::collection::vec(any::<bool>(), 48),
    ) {
        let (image, mask) = image_and_mask(&values, &flags, 6);
        let selected: Vec<f64> = values
            .iter()
            .zip(&flags)
            .filter(|(_, on)| **on)
            .map(|(v, _)| f64::from(*v))
            .collect();
        prop_assume!(!selected.is_empty());
        let expected = selected.iter().sum::<f64>() / selected.len() as f64;
        let mean = masked_mean(image.view(), mask.view()).unwrap();
        prop_assert!((mean - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        let moments = masked_moments(image.view(), mask.view()).unwrap();
        prop_assert_eq!(moments.count, selected.len());
        prop_assert!((moments.mean - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
    }
}

#[test]
fn mismatched_mask_is_a_precondition_violation() {
    let image = Array2::<f32>::zeros((4, 4));
    let mask = Array2::<u8>::from_elem((4, 5), 255);
    for result in [
        skewness(image.view(), mask.view()),
        kurtosis(image.view(), mask.view()),
    ] {
        match result {
            Err(HomError::Precondition(info)) => assert_eq!(info.code, "mask-shape"),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[test]
fn empty_mask_is_a_precondition_violation() {
    let image = Array2::<f32>::from_elem((3, 3), 1.0);
    let mask = Array2::<u8>::zeros((3, 3));
    assert!(matches!(
        skewness(image.view(), mask.view()),
        Err(HomError::Precondition(_))
    ));
    assert!(matches!(
        masked_mean(image.view(), mask.view()),
        Err(HomError::Precondition(_))
    ));
}

#[test]
fn skewed_sample_has_positive_skewness() {
    let image = Array2::from_shape_vec((1, 5), vec![0.0f32, 0.0, 0.0, 0.0, 10.0]).unwrap();
    let mask = Array2::<u8>::from_elem((1, 5), 255);
    let moments = masked_moments(image.view(), mask.view()).unwrap();
    // mean 2, deviations -2 x4 and 8: m2 = 16, m3 = 96, m4 = 832
    assert!((moments.skewness - 96.0 / 64.0).abs() < 1e-12);
    assert!((moments.kurtosis - (832.0 / 256.0 - 3.0)).abs() < 1e-12);
}
