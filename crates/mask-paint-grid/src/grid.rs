//! Grid state, coordinate mapping and painting.

use log::{debug, info};
use mask_paint_core::GrayRaster;
use mask_paint_pgm::PgmImage;

/// Binary state of one mask cell.
///
/// Excluded cells render opaque black and export as 0; included cells
/// render transparent and export as 255.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Included,
    Excluded,
}

impl CellState {
    /// Grayscale byte written when painting this state.
    #[inline]
    pub fn value(self) -> u8 {
        match self {
            CellState::Included => 255,
            CellState::Excluded => 0,
        }
    }

    /// Classify a raw grayscale byte. Values below the midpoint count
    /// as excluded.
    #[inline]
    pub fn from_value(value: u8) -> Self {
        if value < 128 {
            CellState::Excluded
        } else {
            CellState::Included
        }
    }
}

/// Errors from grid construction and import.
#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error(
        "display dimensions and cell size must be positive and finite \
         (width={width}, height={height}, cell_size={cell_size})"
    )]
    InvalidDimension {
        width: f64,
        height: f64,
        cell_size: u32,
    },
    #[error("imported raster length mismatch (expected {expected} bytes, got {got})")]
    RasterMismatch { expected: usize, got: usize },
}

/// The mask editing state: one cell raster sized to the display canvas.
///
/// Cells store raw grayscale bytes (0 = excluded, 255 = included when
/// painted; imported gray values are kept as-is), so a mask survives an
/// import/export round-trip byte-exact. The cell size is purely a
/// rendering and hit-testing convenience over this raster.
#[derive(Clone, Debug)]
pub struct MaskGrid {
    cell_size: u32,
    rows: usize,
    cols: usize,
    display_width: usize,
    display_height: usize,
    cells: GrayRaster,
}

impl MaskGrid {
    /// Build a grid sized to the display canvas, all cells included.
    ///
    /// The grid covers the canvas with `ceil(extent / cell_size)` cells
    /// per axis; `rows`/`cols` hold the index of the last cell.
    pub fn new(display_width: f64, display_height: f64, cell_size: u32) -> Result<Self, GridError> {
        if !display_width.is_finite()
            || display_width <= 0.0
            || !display_height.is_finite()
            || display_height <= 0.0
            || cell_size == 0
        {
            return Err(GridError::InvalidDimension {
                width: display_width,
                height: display_height,
                cell_size,
            });
        }

        let cs = f64::from(cell_size);
        let cols = ((display_width / cs).ceil() as usize).saturating_sub(1);
        let rows = ((display_height / cs).ceil() as usize).saturating_sub(1);
        let cells = GrayRaster::new(cols + 1, rows + 1, CellState::Included.value());

        info!(
            "mask grid {}x{} cells over {}x{} display (cell size {cell_size})",
            cols + 1,
            rows + 1,
            display_width,
            display_height
        );
        Ok(Self {
            cell_size,
            rows,
            cols,
            display_width: display_width.ceil() as usize,
            display_height: display_height.ceil() as usize,
            cells,
        })
    }

    /// Index of the last row.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Index of the last column.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Edge length of one cell in display pixels.
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Display canvas size in pixels (rounded up).
    #[inline]
    pub fn display_size(&self) -> (usize, usize) {
        (self.display_width, self.display_height)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * (self.cols + 1) + col
    }

    pub(crate) fn cell_value(&self, row: usize, col: usize) -> u8 {
        self.cells.data[self.index(row.min(self.rows), col.min(self.cols))]
    }

    /// State of one cell; out-of-range indices clamp to the grid edge.
    pub fn cell(&self, row: usize, col: usize) -> CellState {
        CellState::from_value(self.cell_value(row, col))
    }

    /// Map a pointer position in display pixels to a cell.
    ///
    /// The coordinate is shifted back by one cell size before dividing,
    /// which centers the brush on the pointer rather than anchoring its
    /// top-left corner there. Results clamp to the grid.
    pub fn pointer_to_cell(&self, px: f64, py: f64) -> (usize, usize) {
        let cs = f64::from(self.cell_size);
        let col = clamp_index(((px - cs) / cs).ceil(), self.cols);
        let row = clamp_index(((py - cs) / cs).ceil(), self.rows);
        (row, col)
    }

    /// Set a single cell; out-of-range indices clamp to the grid edge.
    pub fn paint_cell(&mut self, row: usize, col: usize, state: CellState) {
        let idx = self.index(row.min(self.rows), col.min(self.cols));
        self.cells.data[idx] = state.value();
    }

    /// Fill the inclusive rectangle between two corners, in either
    /// corner order. Repeating the same call leaves the grid unchanged.
    pub fn paint_rect(&mut self, r1: usize, c1: usize, r2: usize, c2: usize, state: CellState) {
        let (r1, r2) = ordered(r1.min(self.rows), r2.min(self.rows));
        let (c1, c2) = ordered(c1.min(self.cols), c2.min(self.cols));
        for row in r1..=r2 {
            let start = self.index(row, c1);
            let end = self.index(row, c2);
            self.cells.data[start..=end].fill(state.value());
        }
        debug!("painted {:?} rect ({r1},{c1})..=({r2},{c2})", state);
    }

    /// Paint the single cell under the pointer.
    pub fn paint_brush(&mut self, px: f64, py: f64, state: CellState) {
        self.paint_brush_sized(px, py, 0, state);
    }

    /// Paint the square neighborhood of `radius_cells` around the cell
    /// under the pointer (radius 0 is a single cell).
    pub fn paint_brush_sized(&mut self, px: f64, py: f64, radius_cells: usize, state: CellState) {
        let (row, col) = self.pointer_to_cell(px, py);
        self.paint_rect(
            row.saturating_sub(radius_cells),
            col.saturating_sub(radius_cells),
            row + radius_cells,
            col + radius_cells,
            state,
        );
    }

    /// Reset every cell to included.
    pub fn clear(&mut self) {
        self.cells.data.fill(CellState::Included.value());
    }

    /// Replace the mask from a decoded PGM image.
    ///
    /// An image matching the cell raster dimensions is adopted
    /// byte-for-byte; anything else is nearest-neighbor resampled onto
    /// the existing grid. The swap is atomic: on error the previous
    /// state is untouched.
    pub fn load_from_pgm(&mut self, img: &PgmImage<'_>) -> Result<(), GridError> {
        self.adopt(img.width, img.height, img.samples)
    }

    /// Replace the mask from a grayscale raster (e.g. a canvas capture
    /// collapsed through `GrayRaster::from_rgba`). Same adoption and
    /// resampling rules as [`MaskGrid::load_from_pgm`].
    pub fn load_from_raster(&mut self, raster: &GrayRaster) -> Result<(), GridError> {
        self.adopt(raster.width, raster.height, &raster.data)
    }

    fn adopt(&mut self, width: usize, height: usize, data: &[u8]) -> Result<(), GridError> {
        let expected = width * height;
        if data.len() != expected || expected == 0 {
            return Err(GridError::RasterMismatch {
                expected,
                got: data.len(),
            });
        }

        let grid_w = self.cols + 1;
        let grid_h = self.rows + 1;
        if width == grid_w && height == grid_h {
            self.cells.data.copy_from_slice(data);
            return Ok(());
        }

        debug!("resampling {width}x{height} mask onto {grid_w}x{grid_h} cell grid");
        let mut next = vec![0u8; grid_w * grid_h];
        for row in 0..grid_h {
            let src_y = row * height / grid_h;
            for col in 0..grid_w {
                let src_x = col * width / grid_w;
                next[row * grid_w + col] = data[src_y * width + src_x];
            }
        }
        self.cells.data = next;
        Ok(())
    }

    /// Export the cell raster as a PGM image, one byte per cell,
    /// row-major, `maxval = 255`. Symmetric with
    /// [`MaskGrid::load_from_pgm`].
    pub fn export_to_pgm(&self) -> PgmImage<'_> {
        PgmImage::from_raster(&self.cells)
    }
}

fn clamp_index(value: f64, max: usize) -> usize {
    if !value.is_finite() || value <= 0.0 {
        0
    } else if value >= max as f64 {
        max
    } else {
        value as usize
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mask_paint_pgm::{decode, encode};

    fn grid_10() -> MaskGrid {
        // 100x80 display, cell size 10: cols = 9, rows = 7.
        MaskGrid::new(100.0, 80.0, 10).expect("grid")
    }

    #[test]
    fn sizing_rule_matches_ceil_minus_one() {
        let grid = grid_10();
        assert_eq!(grid.cols(), 9);
        assert_eq!(grid.rows(), 7);

        // Non-multiple extent rounds the cell count up.
        let grid = MaskGrid::new(101.0, 75.0, 10).expect("grid");
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 7);
    }

    #[test]
    fn rejects_bad_dimensions() {
        for (w, h, cs) in [
            (0.0, 80.0, 10),
            (100.0, -1.0, 10),
            (f64::NAN, 80.0, 10),
            (100.0, f64::INFINITY, 10),
            (100.0, 80.0, 0),
        ] {
            assert!(
                matches!(MaskGrid::new(w, h, cs), Err(GridError::InvalidDimension { .. })),
                "accepted {w}x{h}/{cs}"
            );
        }
    }

    #[test]
    fn fresh_grid_is_all_included() {
        let grid = grid_10();
        for row in 0..=grid.rows() {
            for col in 0..=grid.cols() {
                assert_eq!(grid.cell(row, col), CellState::Included);
            }
        }
    }

    #[test]
    fn pointer_mapping_centers_the_brush() {
        let grid = grid_10();
        assert_eq!(grid.pointer_to_cell(10.0, 10.0), (0, 0));
        // col = ceil((25-10)/10) = 2, row = ceil((5-10)/10) clamps to 0.
        assert_eq!(grid.pointer_to_cell(25.0, 5.0), (0, 2));
        // Far outside the canvas clamps to the last cell.
        assert_eq!(grid.pointer_to_cell(1e6, 1e6), (7, 9));
        assert_eq!(grid.pointer_to_cell(-50.0, -50.0), (0, 0));
        assert_eq!(grid.pointer_to_cell(f64::NAN, 10.0), (0, 0));
    }

    #[test]
    fn paint_cell_sets_one_cell() {
        let mut grid = grid_10();
        grid.paint_cell(2, 3, CellState::Excluded);
        assert_eq!(grid.cell(2, 3), CellState::Excluded);
        assert_eq!(grid.cell(2, 4), CellState::Included);
        // Out-of-range clamps instead of panicking.
        grid.paint_cell(1000, 1000, CellState::Excluded);
        assert_eq!(grid.cell(grid.rows(), grid.cols()), CellState::Excluded);
    }

    #[test]
    fn paint_rect_is_idempotent() {
        let mut grid = grid_10();
        grid.paint_rect(1, 1, 3, 3, CellState::Excluded);
        let once = grid.clone();
        grid.paint_rect(1, 1, 3, 3, CellState::Excluded);
        for row in 0..=grid.rows() {
            for col in 0..=grid.cols() {
                assert_eq!(grid.cell(row, col), once.cell(row, col));
            }
        }
    }

    #[test]
    fn paint_rect_normalizes_corners() {
        let mut swapped = grid_10();
        swapped.paint_rect(5, 5, 1, 1, CellState::Excluded);
        let mut ordered = grid_10();
        ordered.paint_rect(1, 1, 5, 5, CellState::Excluded);
        for row in 0..=swapped.rows() {
            for col in 0..=swapped.cols() {
                assert_eq!(swapped.cell(row, col), ordered.cell(row, col));
            }
        }
        assert_eq!(swapped.cell(3, 3), CellState::Excluded);
        assert_eq!(swapped.cell(0, 0), CellState::Included);
    }

    #[test]
    fn brush_radius_covers_square_neighborhood() {
        let mut grid = grid_10();
        grid.paint_brush_sized(45.0, 45.0, 1, CellState::Excluded);
        let (row, col) = grid.pointer_to_cell(45.0, 45.0);
        for r in row - 1..=row + 1 {
            for c in col - 1..=col + 1 {
                assert_eq!(grid.cell(r, c), CellState::Excluded);
            }
        }
        assert_eq!(grid.cell(row, col + 2), CellState::Included);
    }

    #[test]
    fn export_import_round_trip_preserves_cells() {
        let mut grid = grid_10();
        grid.paint_rect(1, 1, 3, 3, CellState::Excluded);
        grid.paint_cell(6, 8, CellState::Excluded);
        grid.paint_rect(2, 2, 2, 2, CellState::Included);

        let bytes = encode(&grid.export_to_pgm());
        let img = decode(&bytes).expect("decode");

        let mut restored = grid_10();
        restored.load_from_pgm(&img).expect("import");
        for row in 0..=grid.rows() {
            for col in 0..=grid.cols() {
                assert_eq!(restored.cell(row, col), grid.cell(row, col));
            }
        }
    }

    #[test]
    fn import_resamples_mismatched_dimensions() {
        let mut grid = grid_10(); // 10x8 cells
        // A 20x16 mask: left half excluded.
        let mut data = vec![255u8; 20 * 16];
        for row in 0..16 {
            for col in 0..10 {
                data[row * 20 + col] = 0;
            }
        }
        let raster = GrayRaster::from_vec(20, 16, data).expect("raster");
        grid.load_from_raster(&raster).expect("import");
        assert_eq!(grid.cell(0, 0), CellState::Excluded);
        assert_eq!(grid.cell(7, 4), CellState::Excluded);
        assert_eq!(grid.cell(0, 9), CellState::Included);
    }

    #[test]
    fn import_rejects_inconsistent_raster_without_clobbering() {
        let mut grid = grid_10();
        grid.paint_cell(0, 0, CellState::Excluded);

        let img = PgmImage {
            width: 4,
            height: 4,
            max_val: 255,
            samples: &[0u8; 7], // violates the length invariant
        };
        let err = grid.load_from_pgm(&img).expect_err("bad raster");
        assert!(matches!(err, GridError::RasterMismatch { .. }));
        assert_eq!(grid.cell(0, 0), CellState::Excluded);
    }

    #[test]
    fn imported_gray_values_survive_reexport() {
        let mut grid = grid_10();
        let mut data = vec![255u8; 10 * 8];
        data[0] = 77; // mid-gray from some external tool
        let raster = GrayRaster::from_vec(10, 8, data.clone()).expect("raster");
        grid.load_from_raster(&raster).expect("import");
        assert_eq!(grid.export_to_pgm().samples, &data[..]);
        assert_eq!(grid.cell(0, 0), CellState::Excluded); // 77 < 128
    }

    #[test]
    fn clear_resets_to_included() {
        let mut grid = grid_10();
        grid.paint_rect(0, 0, 7, 9, CellState::Excluded);
        grid.clear();
        assert_eq!(grid.cell(3, 3), CellState::Included);
    }
}
