//! Distribution family identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HomError};

/// Source distribution family of a composite.
///
/// Persisted documents carry the family as a bare integer (`0`, `1`, `2`).
/// Any other integer is kept verbatim as [`Distribution::Unknown`] so that it
/// survives a round trip; samplers and the ground-truth registry treat it as
/// the degenerate all-zero case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Distribution {
    /// Normal distribution with the cell mean and spread.
    Gaussian,
    /// Uniform distribution on `mean ± √3·spread`.
    Uniform,
    /// Exponential distribution with rate `1/mean`.
    Exponential,
    /// Unrecognised identifier.
    Unknown(i64),
}

impl Distribution {
    /// Families with a defined sampler, in identifier order.
    pub const KNOWN: [Distribution; 3] = [
        Distribution::Gaussian,
        Distribution::Uniform,
        Distribution::Exponential,
    ];

    /// Integer identifier used in file names and documents.
    pub fn id(self) -> i64 {
        match self {
            Distribution::Gaussian => 0,
            Distribution::Uniform => 1,
            Distribution::Exponential => 2,
            Distribution::Unknown(raw) => raw,
        }
    }

    /// Returns true for the three supported families.
    pub fn is_known(self) -> bool {
        !matches!(self, Distribution::Unknown(_))
    }

    /// Strict-mode gate: rejects unknown identifiers instead of degrading.
    pub fn require_known(self) -> Result<Self, HomError> {
        if self.is_known() {
            Ok(self)
        } else {
            Err(HomError::Config(
                ErrorInfo::new("unknown-distribution", "unsupported distribution identifier")
                    .with_context("distribution", self.id().to_string())
                    .with_hint("use 0 (gaussian), 1 (uniform) or 2 (exponential)"),
            ))
        }
    }
}

impl From<i64> for Distribution {
    fn from(raw: i64) -> Self {
        match raw {
            0 => Distribution::Gaussian,
            1 => Distribution::Uniform,
            2 => Distribution::Exponential,
            other => Distribution::Unknown(other),
        }
    }
}

impl From<Distribution> for i64 {
    fn from(value: Distribution) -> Self {
        value.id()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Gaussian => write!(f, "gaussian"),
            Distribution::Uniform => write!(f, "uniform"),
            Distribution::Exponential => write!(f, "exponential"),
            Distribution::Unknown(raw) => write!(f, "unknown({raw})"),
        }
    }
}
