//! Shared raster types for the `mask-paint-*` workspace.
//!
//! This crate is intentionally small and purely value-oriented. It does
//! *not* know about the PGM wire format or the editing grid; it only
//! defines the rectangular sample buffers those crates exchange.

mod logger;
mod raster;

pub use raster::{GrayRaster, GrayRasterView, OverlayRaster, RasterError, RgbaRasterView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
