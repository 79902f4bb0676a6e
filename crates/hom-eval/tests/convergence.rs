use hom_core::{Distribution, RngHandle};
use hom_eval::masked_moments;
use hom_gen::sample;
use ndarray::Array2;

fn mean_abs_moments(side: usize, repetitions: u64) -> (f64, f64) {
    let mut skew_total = 0.0;
    let mut kurt_total = 0.0;
    for repetition in 0..repetitions {
        let mut rng = RngHandle::substream(2024, side as u64 * 1000 + repetition);
        let values = sample(Distribution::Gaussian, 132.0, 1.5, (side, side), &mut rng)
            .unwrap()
            .mapv(|v| v as f32);
        let mask = Array2::<u8>::from_elem((side, side), 255);
        let moments = masked_moments(values.view(), mask.view()).unwrap();
        skew_total += moments.skewness.abs();
        kurt_total += moments.kurtosis.abs();
    }
    (
        skew_total / repetitions as f64,
        kurt_total / repetitions as f64,
    )
}

#[test]
fn gaussian_moments_converge_with_sample_size() {
    let small = mean_abs_moments(16, 12);
    let medium = mean_abs_moments(64, 12);
    let large = mean_abs_moments(256, 12);

    assert!(small.0 > medium.0 && medium.0 > large.0, "{small:?} {medium:?} {large:?}");
    assert!(small.1 > medium.1 && medium.1 > large.1, "{small:?} {medium:?} {large:?}");
    assert!(large.0 < 0.02 && large.1 < 0.04, "{large:?}");
}
