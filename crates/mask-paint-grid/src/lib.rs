//! Mask grid engine.
//!
//! A [`MaskGrid`] owns one logical raster of mask cells sized to the
//! display canvas. Painting operations mutate cells, pointer coordinates
//! map to cells through the brush-centering rule, and the grid renders
//! itself to a grayscale+alpha overlay for compositing. Import and
//! export go through the binary PGM codec in `mask-paint-pgm`.

mod grid;
mod overlay;

pub use grid::{CellState, GridError, MaskGrid};
pub use overlay::Placed;
