//! Grid assembly of parameterized cells into one composite.

use hom_core::{
    CellPosition, CellTruth, Distribution, ErrorInfo, GridGeometry, GroundTruthRecord, HomError,
    RngHandle,
};
use ndarray::{s, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::ground_truth::theoretical_moments;
use crate::noise::{apply_calibrated_noise, NoiseSpec};
use crate::sampler::{reference_spread, sample};

/// Mask value marking pixels that contribute to statistics.
pub const MASK_ACTIVE: u8 = 255;

/// Value written to border pixels before noise is added.
pub const NEUTRAL_VALUE: f32 = 0.0;

/// Parameters of one composite: a family plus per-row means and per-column spreads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollageSpec {
    /// Distribution family shared by every cell.
    pub distribution: Distribution,
    /// Mean for each grid row.
    pub means: Vec<f64>,
    /// Spread (standard deviation) for each grid column.
    pub spreads: Vec<f64>,
    /// Raster layout.
    pub geometry: GridGeometry,
}

impl CollageSpec {
    /// Checks the geometry and that the parameter arrays match its dimensions.
    pub fn validate(&self) -> Result<(), HomError> {
        self.geometry.validate()?;
        if self.means.len() != self.geometry.rows || self.spreads.len() != self.geometry.cols {
            return Err(HomError::Config(
                ErrorInfo::new(
                    "collage-parameters",
                    "one mean per row and one spread per column are required",
                )
                .with_context("rows", self.geometry.rows.to_string())
                .with_context("cols", self.geometry.cols.to_string())
                .with_context("means", self.means.len().to_string())
                .with_context("spreads", self.spreads.len().to_string()),
            ));
        }
        Ok(())
    }

    /// Mean of the cell at `position`.
    pub fn mean_at(&self, position: CellPosition) -> f64 {
        self.means[position.row]
    }

    /// Spread of the cell at `position`.
    pub fn spread_at(&self, position: CellPosition) -> f64 {
        self.spreads[position.col]
    }
}

/// Noise settings applied while assembling a composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Target SNR and offset; the SNR is recorded in the ground truth either way.
    pub noise: NoiseSpec,
    /// When false the composite is left clean and no noise draws are consumed.
    pub inject_noise: bool,
}

impl GenerationOptions {
    /// Noisy generation at `snr_db` with zero-mean noise.
    pub fn noisy(snr_db: f64) -> Self {
        Self {
            noise: NoiseSpec::new(snr_db),
            inject_noise: true,
        }
    }

    /// Clean generation labelled with `snr_db`.
    pub fn clean(snr_db: f64) -> Self {
        Self {
            noise: NoiseSpec::new(snr_db),
            inject_noise: false,
        }
    }
}

/// Flattened single-channel composite of one distribution at one SNR.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSampleSet {
    /// Distribution family of every cell.
    pub distribution: Distribution,
    /// Nominal SNR in decibels.
    pub snr_db: f64,
    /// Layout the pixels follow.
    pub geometry: GridGeometry,
    /// Pixel values, `geometry.pixel_dims()` in shape.
    pub pixels: Array2<f32>,
}

impl CompositeSampleSet {
    /// Full cell block at `position`, border included.
    pub fn cell_view(&self, position: CellPosition) -> ArrayView2<'_, f32> {
        let (y, x) = self.geometry.cell_origin(position);
        let size = self.geometry.cell_size;
        self.pixels.slice(s![y..y + size, x..x + size])
    }

    /// Active square of the cell at `position`.
    pub fn active_view(&self, position: CellPosition) -> ArrayView2<'_, f32> {
        let (y, x) = self.geometry.active_origin(position);
        let size = self.geometry.active_size;
        self.pixels.slice(s![y..y + size, x..x + size])
    }
}

/// Binary inclusion mask derived from geometry alone.
///
/// Equal to [`MASK_ACTIVE`] inside every active square and `0` on borders.
/// It does not depend on sampled values, so one mask serves every
/// distribution and SNR sharing the geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMask {
    geometry: GridGeometry,
    pixels: Array2<u8>,
}

impl InclusionMask {
    /// Builds the mask for `geometry`.
    pub fn from_geometry(geometry: &GridGeometry) -> Result<Self, HomError> {
        geometry.validate()?;
        let mut pixels = Array2::zeros(geometry.pixel_dims());
        let size = geometry.active_size;
        for position in geometry.positions() {
            let (y, x) = geometry.active_origin(position);
            pixels
                .slice_mut(s![y..y + size, x..x + size])
                .fill(MASK_ACTIVE);
        }
        Ok(Self {
            geometry: *geometry,
            pixels,
        })
    }

    /// Geometry the mask was built from.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Mask pixels.
    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    /// Number of active pixels.
    pub fn active_count(&self) -> usize {
        self.pixels.iter().filter(|&&value| value != 0).count()
    }
}

/// Samples every cell of `spec` into a composite and records its ground truth.
///
/// Cells are visited in raster order. For each cell the active square is
/// sampled first, then, if enabled, a noise field covering the whole cell is
/// drawn from the same `rng`.
pub fn assemble(
    spec: &CollageSpec,
    options: &GenerationOptions,
    rng: &mut RngHandle,
) -> Result<(CompositeSampleSet, GroundTruthRecord), HomError> {
    spec.validate()?;
    let geometry = spec.geometry;
    let moments = theoretical_moments(spec.distribution);
    let mut pixels = Array2::from_elem(geometry.pixel_dims(), NEUTRAL_VALUE);
    let mut cells = Vec::with_capacity(geometry.cell_count());

    for position in geometry.positions() {
        let mean = spec.mean_at(position);
        let spread = spec.spread_at(position);

        let active = sample(
            spec.distribution,
            mean,
            spread,
            (geometry.active_size, geometry.active_size),
            rng,
        )?;
        let (ay, ax) = geometry.active_origin(position);
        let size = geometry.active_size;
        pixels
            .slice_mut(s![ay..ay + size, ax..ax + size])
            .zip_mut_with(&active, |pixel, value| *pixel = *value as f32);

        if options.inject_noise {
            let (cy, cx) = geometry.cell_origin(position);
            let cell = geometry.cell_size;
            apply_calibrated_noise(
                pixels.slice_mut(s![cy..cy + cell, cx..cx + cell]),
                reference_spread(spec.distribution, mean, spread),
                &options.noise,
                rng,
            )?;
        }

        cells.push(CellTruth {
            pic_coordinates: position.into(),
            theoretical_skewness: moments.skewness,
            theoretical_kurtosis: moments.excess_kurtosis,
            mean,
            std: spread,
        });
    }

    let composite = CompositeSampleSet {
        distribution: spec.distribution,
        snr_db: options.noise.snr_db,
        geometry,
        pixels,
    };
    let ground_truth = GroundTruthRecord {
        distribution: spec.distribution,
        snr_db: options.noise.snr_db,
        cells,
    };
    Ok((composite, ground_truth))
}

/// Assembles a composite together with its ground truth and inclusion mask.
pub fn build_grid(
    spec: &CollageSpec,
    options: &GenerationOptions,
    rng: &mut RngHandle,
) -> Result<(CompositeSampleSet, GroundTruthRecord, InclusionMask), HomError> {
    let (composite, ground_truth) = assemble(spec, options, rng)?;
    let mask = InclusionMask::from_geometry(&spec.geometry)?;
    Ok((composite, ground_truth, mask))
}
