#![deny(missing_docs)]
#![doc = "Masked higher-order moment estimation and error aggregation against ground truth."]

/// Error metrics and sweep aggregation.
pub mod assess;
/// Per-cell evaluation of a composite.
pub mod evaluate;
/// Masked moment estimators.
pub mod moments;

pub use assess::{
    aggregate_across_sweep, compare, relative_error, AcceptableLevel, BandSummary,
    CollageErrorMetrics, DistributionSeries, ErrorMetrics, Moment, SweepTable,
    DEFAULT_ACCEPTABLE_ERROR, ZERO_TRUTH_EPSILON,
};
pub use evaluate::evaluate_collage;
pub use moments::{kurtosis, masked_mean, masked_moments, skewness, MaskedMoments, STD_FLOOR};
