//! Conversion of the linear film into output files.

use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::error::{OutputError, RenderError};
use crate::film::Film;
use crate::math::RGBColor;

/// Packs every pixel to 8 bits per channel.
pub fn pack_film(film: &Film<RGBColor>) -> Result<RgbaImage, OutputError> {
    let size_error = || OutputError::Size {
        width: film.width,
        height: film.height,
    };
    let width = u32::try_from(film.width).map_err(|_| size_error())?;
    let height = u32::try_from(film.height).map_err(|_| size_error())?;
    let raw: Vec<u8> = film.buffer.iter().flat_map(|c| c.pack()).collect();
    RgbaImage::from_raw(width, height, raw).ok_or_else(size_error)
}

/// Writes the packed film, the format follows the file extension.
pub fn write_png(film: &Film<RGBColor>, path: &Path) -> Result<(), RenderError> {
    let unwritable = |source: OutputError| RenderError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    };
    let image = pack_film(film).map_err(unwritable)?;
    image
        .save(path)
        .map_err(|e| unwritable(OutputError::from(e)))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Writes the unclamped linear film as OpenEXR.
pub fn write_exr(film: &Film<RGBColor>, path: &Path) -> Result<(), RenderError> {
    exr::prelude::write_rgba_file(path, film.width, film.height, |x, y| {
        let c = film.at(x, y);
        (c.r() as f32, c.g() as f32, c.b() as f32, c.a() as f32)
    })
    .map_err(|e| RenderError::OutputUnwritable {
        path: path.to_path_buf(),
        source: OutputError::from(e),
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
