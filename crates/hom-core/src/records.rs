//! Persisted ground-truth and evaluation documents.

use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::geometry::CellPosition;

/// Position block used by ground-truth documents (`pic_coordinates`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicCoordinates {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
}

impl From<CellPosition> for PicCoordinates {
    fn from(position: CellPosition) -> Self {
        Self {
            row: position.row,
            col: position.col,
        }
    }
}

impl From<PicCoordinates> for CellPosition {
    fn from(coords: PicCoordinates) -> Self {
        Self {
            row: coords.row,
            col: coords.col,
        }
    }
}

/// Theoretical moments and generating parameters of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellTruth {
    /// Grid position.
    pub pic_coordinates: PicCoordinates,
    /// Population skewness of the generating family.
    pub theoretical_skewness: f64,
    /// Population excess kurtosis of the generating family.
    pub theoretical_kurtosis: f64,
    /// Mean the cell was generated with.
    pub mean: f64,
    /// Spread (standard deviation) the cell was generated with.
    pub std: f64,
}

impl CellTruth {
    /// Grid position of the cell.
    pub fn position(&self) -> CellPosition {
        self.pic_coordinates.into()
    }
}

/// Ground truth persisted next to every composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    /// Distribution family shared by every cell.
    pub distribution: Distribution,
    /// Nominal SNR in decibels.
    pub snr_db: f64,
    /// One entry per cell in raster order.
    pub cells: Vec<CellTruth>,
}

/// Moments measured on one cell after noise and storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEvaluation {
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub column: usize,
    /// Sample skewness over the active region.
    pub evaluated_skewness: f64,
    /// Sample excess kurtosis over the active region.
    pub evaluated_kurtosis: f64,
}

impl CellEvaluation {
    /// Grid position of the cell.
    pub fn position(&self) -> CellPosition {
        CellPosition {
            row: self.row,
            col: self.column,
        }
    }
}

/// Evaluation document produced from a reloaded composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EvaluationRecord {
    /// One entry per evaluated cell.
    pub cells: Vec<CellEvaluation>,
}
