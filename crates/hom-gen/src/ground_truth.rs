use hom_core::Distribution;
use serde::{Deserialize, Serialize};

/// Population skewness and excess kurtosis of a distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalMoments {
    /// Third standardized moment.
    pub skewness: f64,
    /// Fourth standardized moment minus 3.
    pub excess_kurtosis: f64,
}

impl TheoreticalMoments {
    const fn new(skewness: f64, excess_kurtosis: f64) -> Self {
        Self {
            skewness,
            excess_kurtosis,
        }
    }
}

/// Looks up the theoretical moments of `distribution`.
///
/// The values do not depend on mean or spread. Unknown identifiers map to
/// `(0, 0)` rather than an error, matching the degenerate all-zero samples the
/// sampler produces for them.
pub fn theoretical_moments(distribution: Distribution) -> TheoreticalMoments {
    match distribution {
        Distribution::Gaussian => TheoreticalMoments::new(0.0, 0.0),
        Distribution::Uniform => TheoreticalMoments::new(0.0, -1.2),
        Distribution::Exponential => TheoreticalMoments::new(2.0, 6.0),
        Distribution::Unknown(_) => TheoreticalMoments::new(0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_table() {
        assert_eq!(
            theoretical_moments(Distribution::Exponential),
            TheoreticalMoments::new(2.0, 6.0)
        );
        assert_eq!(
            theoretical_moments(Distribution::Uniform).excess_kurtosis,
            -1.2
        );
        assert_eq!(
            theoretical_moments(Distribution::Unknown(5)),
            theoretical_moments(Distribution::Gaussian)
        );
    }
}
