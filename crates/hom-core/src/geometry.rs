//! Grid geometry of a composite and its cells.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, HomError};

/// Grid position of a cell inside a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    /// Zero-based grid row.
    pub row: usize,
    /// Zero-based grid column.
    pub col: usize,
}

/// Raster layout shared by generation and evaluation.
///
/// Cell `(row, col)` covers pixels `[row*cell_size, (row+1)*cell_size)` on the
/// vertical axis and `[col*cell_size, (col+1)*cell_size)` on the horizontal
/// axis. Its active square of side `active_size` is centred, leaving a border
/// of `(cell_size - active_size) / 2` pixels on every side. Both sides of the
/// pipeline must use the same geometry or statistics are silently misaligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of cell rows.
    #[serde(default = "GridGeometry::default_rows")]
    pub rows: usize,
    /// Number of cell columns.
    #[serde(default = "GridGeometry::default_cols")]
    pub cols: usize,
    /// Side of a cell in pixels.
    #[serde(default = "GridGeometry::default_cell_size")]
    pub cell_size: usize,
    /// Side of the active square in pixels.
    #[serde(default = "GridGeometry::default_active_size")]
    pub active_size: usize,
}

impl GridGeometry {
    const fn default_rows() -> usize {
        5
    }

    const fn default_cols() -> usize {
        5
    }

    const fn default_cell_size() -> usize {
        256
    }

    const fn default_active_size() -> usize {
        228
    }

    /// Builds and validates a geometry.
    pub fn new(
        rows: usize,
        cols: usize,
        cell_size: usize,
        active_size: usize,
    ) -> Result<Self, HomError> {
        let geometry = Self {
            rows,
            cols,
            cell_size,
            active_size,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Checks the invariants every consumer relies on.
    pub fn validate(&self) -> Result<(), HomError> {
        let fail = |code: &str, message: &str| {
            HomError::Config(
                ErrorInfo::new(code, message)
                    .with_context("rows", self.rows.to_string())
                    .with_context("cols", self.cols.to_string())
                    .with_context("cell_size", self.cell_size.to_string())
                    .with_context("active_size", self.active_size.to_string()),
            )
        };
        if self.rows == 0 || self.cols == 0 {
            return Err(fail("geometry-grid", "grid dimensions must be at least 1"));
        }
        if self.cell_size == 0 {
            return Err(fail("geometry-cell", "cell size must be positive"));
        }
        if self.active_size == 0 || self.active_size > self.cell_size {
            return Err(fail(
                "geometry-active",
                "active size must be in 1..=cell_size so the border stays below half a cell",
            ));
        }
        if (self.cell_size - self.active_size) % 2 != 0 {
            return Err(fail(
                "geometry-border",
                "cell_size - active_size must be even for a symmetric border",
            ));
        }
        Ok(())
    }

    /// Border width on each side of the active square.
    pub fn border(&self) -> usize {
        (self.cell_size - self.active_size) / 2
    }

    /// Pixel dimensions of the composite as `(height, width)`.
    pub fn pixel_dims(&self) -> (usize, usize) {
        (self.rows * self.cell_size, self.cols * self.cell_size)
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Top-left pixel `(y, x)` of a cell.
    pub fn cell_origin(&self, position: CellPosition) -> (usize, usize) {
        (position.row * self.cell_size, position.col * self.cell_size)
    }

    /// Top-left pixel `(y, x)` of a cell's active square.
    pub fn active_origin(&self, position: CellPosition) -> (usize, usize) {
        let (y, x) = self.cell_origin(position);
        (y + self.border(), x + self.border())
    }

    /// All cell positions in raster order (row-major).
    pub fn positions(&self) -> impl Iterator<Item = CellPosition> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellPosition { row, col }))
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            rows: Self::default_rows(),
            cols: Self::default_cols(),
            cell_size: Self::default_cell_size(),
            active_size: Self::default_active_size(),
        }
    }
}
