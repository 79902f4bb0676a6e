//! Single-channel 32-bit float TIFF persistence.
//!
//! Pixels are stored uncompressed as IEEE floats, so a reload reproduces the
//! written array bit for bit.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use hom_core::{ErrorInfo, HomError};
use ndarray::{Array2, ArrayView2};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{colortype, TiffEncoder};

fn codec_error(code: &str, path: &Path, err: impl ToString) -> HomError {
    HomError::Codec(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

fn io_error(code: &str, path: &Path, err: impl ToString) -> HomError {
    HomError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Writes `pixels` as a Gray32Float TIFF.
pub fn write_raster(path: &Path, pixels: ArrayView2<'_, f32>) -> Result<(), HomError> {
    let (height, width) = pixels.dim();
    let width = u32::try_from(width).map_err(|err| codec_error("raster-dims", path, err))?;
    let height = u32::try_from(height).map_err(|err| codec_error("raster-dims", path, err))?;
    let data: Vec<f32> = pixels.iter().copied().collect();

    let file = File::create(path).map_err(|err| io_error("raster-create", path, err))?;
    let mut writer = BufWriter::new(file);
    {
        let mut encoder = TiffEncoder::new(&mut writer)
            .map_err(|err| codec_error("raster-encode", path, err))?;
        encoder
            .write_image::<colortype::Gray32Float>(width, height, &data)
            .map_err(|err| codec_error("raster-encode", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| io_error("raster-write", path, err))
}

/// Reads a raster written by [`write_raster`].
///
/// Anything other than single-channel 32-bit float data is a codec error.
pub fn read_raster(path: &Path) -> Result<Array2<f32>, HomError> {
    let file = File::open(path).map_err(|err| io_error("raster-open", path, err))?;
    let mut decoder =
        Decoder::new(BufReader::new(file)).map_err(|err| codec_error("raster-decode", path, err))?;
    let (width, height) = decoder
        .dimensions()
        .map_err(|err| codec_error("raster-decode", path, err))?;
    let color = decoder
        .colortype()
        .map_err(|err| codec_error("raster-decode", path, err))?;
    if color != tiff::ColorType::Gray(32) {
        return Err(codec_error(
            "raster-format",
            path,
            format!("expected 32-bit single channel data, found {color:?}"),
        ));
    }
    let data = match decoder
        .read_image()
        .map_err(|err| codec_error("raster-decode", path, err))?
    {
        DecodingResult::F32(data) => data,
        _ => {
            return Err(codec_error(
                "raster-format",
                path,
                "expected IEEE float samples",
            ))
        }
    };
    Array2::from_shape_vec((height as usize, width as usize), data)
        .map_err(|err| codec_error("raster-shape", path, err))
}
