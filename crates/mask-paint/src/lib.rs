//! High-level facade crate for the `mask-paint-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the raster, codec and grid crates
//! - the [`MaskEditor`] widget: a pointer-event state machine that
//!   drives the grid engine and renders through a host-supplied
//!   [`DisplaySurface`]
//! - a small serde [`EditorConfig`] for persisted editor settings.
//!
//! ## Quickstart
//!
//! ```no_run
//! use mask_paint::{DisplaySurface, MaskEditor, PointerButton};
//! # struct MySurface;
//! # impl DisplaySurface for MySurface {
//! #     fn viewport(&self) -> Option<(f64, f64)> { Some((640.0, 480.0)) }
//! #     fn get_color_raster(&self, _: usize, _: usize, _: usize, _: usize) -> Vec<u8> { vec![] }
//! #     fn put_grayscale(&mut self, _: &mask_paint::OverlayRaster, _: usize, _: usize) {}
//! #     fn composite(&mut self, _: &mask_paint::OverlayRaster, _: usize, _: usize, _: f32) {}
//! # }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = MaskEditor::new(MySurface, 18)?;
//! editor.on_pointer_down(100.0, 100.0, PointerButton::Primary, false);
//! editor.on_pointer_move(140.0, 120.0);
//! editor.on_pointer_up(140.0, 120.0, PointerButton::Primary);
//! std::fs::write("mask.pgm", editor.mask_bytes())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `mask_paint::core`: raster value types and the logger.
//! - `mask_paint::pgm`: the binary PGM codec and file helpers.
//! - `mask_paint::grid`: the cell-grid mask engine.

pub use mask_paint_core as core;
pub use mask_paint_grid as grid;
pub use mask_paint_pgm as pgm;

pub use mask_paint_core::{GrayRaster, OverlayRaster, RgbaRasterView};
pub use mask_paint_grid::{CellState, MaskGrid, Placed};
pub use mask_paint_pgm::{PgmFormatError, PgmImage};

mod config;
mod editor;
mod surface;

pub use config::{ConfigError, EditorConfig};
pub use editor::{EditorError, MaskEditor, PointerButton};
pub use surface::DisplaySurface;
