#![deny(missing_docs)]
#![doc = "Core data types, error taxonomy and seeding policy for the higher-order moment benchmark."]

pub mod distribution;
pub mod errors;
pub mod geometry;
pub mod provenance;
pub mod records;
pub mod rng;

pub use distribution::Distribution;
pub use errors::{ErrorInfo, HomError};
pub use geometry::{CellPosition, GridGeometry};
pub use provenance::{RunProvenance, SchemaVersion};
pub use records::{CellEvaluation, CellTruth, EvaluationRecord, GroundTruthRecord, PicCoordinates};
pub use rng::{derive_substream_seed, RngHandle, StreamPolicy};
