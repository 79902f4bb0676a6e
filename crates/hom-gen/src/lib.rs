#![deny(missing_docs)]
#![doc = "Synthetic composite generation: ground-truth registry, samplers, calibrated noise and grid assembly."]

/// Grid assembly and inclusion masks.
pub mod collage;
/// Theoretical moments per distribution family.
pub mod ground_truth;
/// SNR-calibrated noise injection.
pub mod noise;
/// Per-family sample generation.
pub mod sampler;

pub use collage::{
    assemble, build_grid, CollageSpec, CompositeSampleSet, GenerationOptions, InclusionMask,
    MASK_ACTIVE, NEUTRAL_VALUE,
};
pub use ground_truth::{theoretical_moments, TheoreticalMoments};
pub use noise::{add_calibrated_noise, apply_calibrated_noise, noise_stddev, NoiseSpec};
pub use sampler::{reference_spread, sample};
