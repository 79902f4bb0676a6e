use hom_core::{CellEvaluation, ErrorInfo, EvaluationRecord, GridGeometry, HomError};
use ndarray::{s, ArrayView2};

use crate::moments::masked_moments;

fn shape_error(label: &str, actual: (usize, usize), expected: (usize, usize)) -> HomError {
    HomError::Precondition(
        ErrorInfo::new("collage-shape", format!("{label} does not match the grid geometry"))
            .with_context("actual", format!("{}x{}", actual.0, actual.1))
            .with_context("expected", format!("{}x{}", expected.0, expected.1))
            .with_hint("generation and evaluation must use the same cell and active sizes"),
    )
}

/// Measures skewness and excess kurtosis of every cell's active square.
///
/// Cells are evaluated in raster order. `composite` and `mask` must both have
/// the pixel dimensions implied by `geometry`.
pub fn evaluate_collage(
    composite: ArrayView2<'_, f32>,
    mask: ArrayView2<'_, u8>,
    geometry: &GridGeometry,
) -> Result<EvaluationRecord, HomError> {
    geometry.validate()?;
    let expected = geometry.pixel_dims();
    if composite.dim() != expected {
        return Err(shape_error("composite", composite.dim(), expected));
    }
    if mask.dim() != expected {
        return Err(shape_error("mask", mask.dim(), expected));
    }

    let size = geometry.active_size;
    let mut cells = Vec::with_capacity(geometry.cell_count());
    for position in geometry.positions() {
        let (y, x) = geometry.active_origin(position);
        let moments = masked_moments(
            composite.slice(s![y..y + size, x..x + size]),
            mask.slice(s![y..y + size, x..x + size]),
        )?;
        cells.push(CellEvaluation {
            row: position.row,
            column: position.col,
            evaluated_skewness: moments.skewness,
            evaluated_kurtosis: moments.kurtosis,
        });
    }
    Ok(EvaluationRecord { cells })
}
