//! Binary PGM ("P5") codec.
//!
//! Decoding is zero-copy: [`decode`] borrows the pixel payload straight
//! out of the input buffer. Use [`PgmImage::to_raster`] when an owned
//! copy is needed, and [`PgmImage::from_raster`] to wrap a raster
//! produced by the grid engine for encoding.

mod file;
mod format;

pub use file::{read_pgm_file, write_pgm_file, PgmIoError};
pub use format::{decode, encode, PgmFormatError, PgmImage, MAGIC};
