//! Whole-file helpers around the codec.

use std::fs;
use std::path::Path;

use log::debug;
use mask_paint_core::GrayRaster;

use crate::format::{decode, encode, PgmFormatError, PgmImage};

/// Errors from reading or writing a PGM file.
#[derive(thiserror::Error, Debug)]
pub enum PgmIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Format(#[from] PgmFormatError),
}

/// Read and decode a binary PGM file into an owned raster.
pub fn read_pgm_file(path: impl AsRef<Path>) -> Result<GrayRaster, PgmIoError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let img = decode(&bytes)?;
    debug!("read {}x{} mask from {}", img.width, img.height, path.display());
    Ok(img.to_raster())
}

/// Encode a raster and write it as a binary PGM file.
pub fn write_pgm_file(path: impl AsRef<Path>, raster: &GrayRaster) -> Result<(), PgmIoError> {
    let path = path.as_ref();
    let img = PgmImage::from_raster(raster);
    fs::write(path, encode(&img))?;
    debug!(
        "wrote {}x{} mask to {}",
        raster.width,
        raster.height,
        path.display()
    );
    Ok(())
}
