use hom_core::{Distribution, RngHandle};
use hom_gen::{reference_spread, sample};

fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

#[test]
fn gaussian_matches_mean_and_spread() {
    let mut rng = RngHandle::from_seed(11);
    let values = sample(Distribution::Gaussian, 132.0, 1.5, (200, 200), &mut rng).unwrap();
    let (mean, variance) = mean_and_variance(values.as_slice().unwrap());
    assert!((mean - 132.0).abs() < 0.05, "mean {mean}");
    assert!((variance.sqrt() - 1.5).abs() < 0.03, "std {}", variance.sqrt());
}

#[test]
fn uniform_variance_equals_spread_squared() {
    let mut rng = RngHandle::from_seed(12);
    let values = sample(Distribution::Uniform, 88.0, 2.0, (200, 200), &mut rng).unwrap();
    let half_width = 3.0_f64.sqrt() * 2.0;
    assert!(values
        .iter()
        .all(|v| *v >= 88.0 - half_width && *v <= 88.0 + half_width));
    let (mean, variance) = mean_and_variance(values.as_slice().unwrap());
    assert!((mean - 88.0).abs() < 0.05);
    assert!((variance - 4.0).abs() < 0.1, "variance {variance}");
}

#[test]
fn exponential_ignores_spread() {
    let mut rng_a = RngHandle::from_seed(13);
    let mut rng_b = RngHandle::from_seed(13);
    let narrow = sample(Distribution::Exponential, 44.0, 0.5, (64, 64), &mut rng_a).unwrap();
    let wide = sample(Distribution::Exponential, 44.0, 2.5, (64, 64), &mut rng_b).unwrap();
    assert_eq!(narrow, wide);

    let mut rng = RngHandle::from_seed(14);
    let values = sample(Distribution::Exponential, 44.0, 0.5, (200, 200), &mut rng).unwrap();
    assert!(values.iter().all(|v| *v >= 0.0));
    let (mean, _) = mean_and_variance(values.as_slice().unwrap());
    assert!((mean - 44.0).abs() < 1.0, "mean {mean}");
    assert_eq!(reference_spread(Distribution::Exponential, 44.0, 0.5), 44.0);
    assert_eq!(reference_spread(Distribution::Uniform, 44.0, 0.5), 0.5);
}

#[test]
fn unknown_distribution_yields_zeros() {
    let mut rng = RngHandle::from_seed(15);
    let values = sample(Distribution::Unknown(9), 44.0, 0.5, (8, 8), &mut rng).unwrap();
    assert!(values.iter().all(|v| *v == 0.0));
}

#[test]
fn identical_seeds_reproduce_samples() {
    let mut rng_a = RngHandle::from_seed(42);
    let mut rng_b = RngHandle::from_seed(42);
    for distribution in Distribution::KNOWN {
        let a = sample(distribution, 176.0, 1.0, (16, 16), &mut rng_a).unwrap();
        let b = sample(distribution, 176.0, 1.0, (16, 16), &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn invalid_parameters_are_config_errors() {
    let mut rng = RngHandle::from_seed(1);
    assert!(sample(Distribution::Gaussian, 1.0, -1.0, (2, 2), &mut rng).is_err());
    assert!(sample(Distribution::Uniform, f64::NAN, 1.0, (2, 2), &mut rng).is_err());
    assert!(sample(Distribution::Exponential, 0.0, 1.0, (2, 2), &mut rng).is_err());
}

#[test]
fn overflowing_uniform_bounds_are_rejected() {
    let mut rng = RngHandle::from_seed(1);
    match sample(Distribution::Uniform, 0.0, 1.0e308, (2, 2), &mut rng) {
        Err(hom_core::HomError::Config(info)) => assert_eq!(info.code, "sampler-parameter"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(sample(Distribution::Uniform, 1.0e308, 1.0e308, (2, 2), &mut rng).is_err());
}
