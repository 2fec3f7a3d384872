//! The mask editor widget: pointer gestures over the grid engine.

use log::{debug, info};
use mask_paint_core::{GrayRaster, OverlayRaster, RgbaRasterView};
use mask_paint_grid::{CellState, GridError, MaskGrid, Placed};
use mask_paint_pgm::{decode, encode, read_pgm_file, write_pgm_file, PgmFormatError, PgmIoError};
use std::path::Path;

use crate::config::EditorConfig;
use crate::surface::DisplaySurface;

/// Opacity the committed mask is composited at.
const MASK_OPACITY: f32 = 0.8;

/// Pointer buttons the editor reacts to.
///
/// The primary button paints exclusions (opaque black), the secondary
/// button paints inclusions (clears). The middle button is tracked but
/// never paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    #[inline]
    fn index(self) -> usize {
        match self {
            PointerButton::Primary => 0,
            PointerButton::Middle => 1,
            PointerButton::Secondary => 2,
        }
    }

    fn paint_state(self) -> Option<CellState> {
        match self {
            PointerButton::Primary => Some(CellState::Excluded),
            PointerButton::Secondary => Some(CellState::Included),
            PointerButton::Middle => None,
        }
    }
}

/// Errors raised by the editor facade.
#[derive(thiserror::Error, Debug)]
pub enum EditorError {
    #[error("destination surface does not exist or exposes no viewport")]
    DestinationNotFound,
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Format(#[from] PgmFormatError),
    #[error(transparent)]
    File(#[from] PgmIoError),
}

/// Interactive mask editor over a host-supplied display surface.
///
/// All state lives on this value: gesture tracking is scoped to the
/// instance and disappears when it is dropped; no global registration
/// of any kind takes place. One drag gesture per button is tracked at a
/// time, which is the widget's whole concurrency model.
#[derive(Debug)]
pub struct MaskEditor<S: DisplaySurface> {
    surface: S,
    grid: MaskGrid,
    brush_cells: usize,
    pressed: [bool; 3],
    origin: (f64, f64),
    shift_latched: bool,
    preview: Option<Placed<OverlayRaster>>,
}

impl<S: DisplaySurface> MaskEditor<S> {
    /// Attach an editor to a surface.
    ///
    /// Fails with [`EditorError::DestinationNotFound`] when the surface
    /// has no viewport, and propagates invalid dimensions from the
    /// grid. Construction failures are fatal: no editor value exists on
    /// error.
    pub fn new(surface: S, cell_size: u32) -> Result<Self, EditorError> {
        let (width, height) = surface.viewport().ok_or(EditorError::DestinationNotFound)?;
        let grid = MaskGrid::new(width, height, cell_size)?;
        info!("mask editor attached to {width}x{height} surface");
        Ok(Self {
            surface,
            grid,
            brush_cells: 0,
            pressed: [false; 3],
            origin: (0.0, 0.0),
            shift_latched: false,
            preview: None,
        })
    }

    /// Attach with settings taken from a config value.
    pub fn with_config(surface: S, config: &EditorConfig) -> Result<Self, EditorError> {
        let mut editor = Self::new(surface, config.cell_size)?;
        editor.brush_cells = config.brush_cells;
        Ok(editor)
    }

    /// The mask state, read-only. Mutation goes through gestures or the
    /// import methods so the display stays in sync.
    #[inline]
    pub fn grid(&self) -> &MaskGrid {
        &self.grid
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Brush radius in cells (0 = one cell per dab).
    #[inline]
    pub fn brush_cells(&self) -> usize {
        self.brush_cells
    }

    pub fn set_brush_cells(&mut self, radius: usize) {
        self.brush_cells = radius;
    }

    /// Begin a gesture. Shift held at press time selects the area
    /// gesture for the whole drag; the press position anchors it.
    pub fn on_pointer_down(&mut self, x: f64, y: f64, button: PointerButton, shift: bool) {
        self.pressed[button.index()] = true;
        self.origin = (x, y);
        self.shift_latched = shift;
        // A press paints (or previews) immediately, before any motion.
        self.on_pointer_move(x, y);
    }

    /// Continue the active gesture, if any: brush cells on a plain
    /// drag, refresh the rectangle preview on a shift drag.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let Some(state) = self.active_state() else {
            return;
        };
        if self.shift_latched {
            let (r1, c1) = self.grid.pointer_to_cell(self.origin.0, self.origin.1);
            let (r2, c2) = self.grid.pointer_to_cell(x, y);
            self.preview = Some(self.grid.preview_rect(r1, c1, r2, c2, state));
        } else {
            self.grid.paint_brush_sized(x, y, self.brush_cells, state);
        }
        self.render();
    }

    /// End a gesture. A shift drag commits its rectangle here; the
    /// preview is discarded either way.
    pub fn on_pointer_up(&mut self, x: f64, y: f64, button: PointerButton) {
        if !self.pressed[button.index()] {
            return;
        }
        self.pressed[button.index()] = false;
        self.preview = None;

        if self.shift_latched {
            if let Some(state) = button.paint_state() {
                let (r1, c1) = self.grid.pointer_to_cell(self.origin.0, self.origin.1);
                let (r2, c2) = self.grid.pointer_to_cell(x, y);
                self.grid.paint_rect(r1, c1, r2, c2, state);
                debug!("committed area gesture ({r1},{c1})..({r2},{c2})");
            }
        }
        if self.pressed == [false; 3] {
            self.shift_latched = false;
        }
        self.render();
    }

    /// Composite the committed mask (80% opacity) and any live preview
    /// (full opacity) onto the surface. The backdrop below is the
    /// host's concern.
    pub fn render(&mut self) {
        let overlay = self.grid.render_overlay();
        self.surface.composite(&overlay, 0, 0, MASK_OPACITY);
        if let Some(preview) = &self.preview {
            self.surface.composite(&preview.raster, preview.x, preview.y, 1.0);
        }
    }

    /// Replace the mask from encoded PGM bytes.
    ///
    /// Decode failures surface as typed errors and leave the current
    /// mask untouched, so a host can fall back to "no mask" without
    /// aborting.
    pub fn set_mask_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let img = decode(bytes)?;
        self.grid.load_from_pgm(&img)?;
        self.render();
        Ok(())
    }

    /// Export the mask as encoded PGM bytes.
    pub fn mask_bytes(&self) -> Vec<u8> {
        encode(&self.grid.export_to_pgm())
    }

    /// Load the mask from a PGM file.
    pub fn load_mask(&mut self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let raster = read_pgm_file(path)?;
        self.grid.load_from_raster(&raster)?;
        self.render();
        Ok(())
    }

    /// Save the mask to a PGM file.
    pub fn save_mask(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let img = self.grid.export_to_pgm();
        write_pgm_file(path, &img.to_raster())?;
        Ok(())
    }

    /// Import the surface's current pixels as the mask: the capture is
    /// collapsed to grayscale (transparent pixels count as white) and
    /// resampled onto the cell grid.
    pub fn capture_from_surface(&mut self) -> Result<(), EditorError> {
        let (width, height) = self.grid.display_size();
        let data = self.surface.get_color_raster(0, 0, width, height);
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(EditorError::Grid(GridError::RasterMismatch {
                expected,
                got: data.len(),
            }));
        }
        let gray = GrayRaster::from_rgba(RgbaRasterView {
            width,
            height,
            data: &data,
        });
        self.grid.load_from_raster(&gray)?;
        self.render();
        Ok(())
    }

    /// Reallocate the grid for a new display size. All cells reset to
    /// included and any in-flight gesture is dropped.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), EditorError> {
        self.grid = MaskGrid::new(width, height, self.grid.cell_size())?;
        self.pressed = [false; 3];
        self.preview = None;
        self.shift_latched = false;
        self.render();
        Ok(())
    }

    fn active_state(&self) -> Option<CellState> {
        for button in [PointerButton::Primary, PointerButton::Secondary] {
            if self.pressed[button.index()] {
                return button.paint_state();
            }
        }
        None
    }
}
