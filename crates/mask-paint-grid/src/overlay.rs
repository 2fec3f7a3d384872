//! Overlay rendering: committed mask and live rectangle previews.

use mask_paint_core::OverlayRaster;

use crate::grid::{CellState, MaskGrid};

/// Preview tint alpha, rgba(..., 0.6) in byte form.
const PREVIEW_ALPHA: u8 = 153;

/// A raster plus the display-pixel origin it should be composited at.
#[derive(Clone, Debug)]
pub struct Placed<T> {
    pub x: usize,
    pub y: usize,
    pub raster: T,
}

impl MaskGrid {
    /// Render the committed mask to a display-size overlay.
    ///
    /// Each cell expands to a `cell_size x cell_size` block: excluded
    /// cells become opaque black, included cells fully transparent
    /// (alpha clamped to 1). The host composites this at 80% global
    /// opacity over the backdrop.
    pub fn render_overlay(&self) -> OverlayRaster {
        let (width, height) = self.display_size();
        let mut out = OverlayRaster::new(width, height);
        let cs = self.cell_size() as usize;
        for row in 0..=self.rows() {
            for col in 0..=self.cols() {
                let gray = self.cell_value(row, col);
                out.fill_rect(
                    col * cs,
                    row * cs,
                    cs,
                    cs,
                    gray,
                    OverlayRaster::alpha_for(gray),
                );
            }
        }
        out
    }

    /// Build a translucent preview block for an area gesture without
    /// touching any cell state. Excluded intent tints black, included
    /// intent tints white, both at 60% alpha; the host composites the
    /// preview at full opacity above the committed mask.
    pub fn preview_rect(
        &self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
        state: CellState,
    ) -> Placed<OverlayRaster> {
        let (r1, r2) = minmax(r1.min(self.rows()), r2.min(self.rows()));
        let (c1, c2) = minmax(c1.min(self.cols()), c2.min(self.cols()));
        let cs = self.cell_size() as usize;

        let width = (c2 - c1 + 1) * cs;
        let height = (r2 - r1 + 1) * cs;
        let mut raster = OverlayRaster::new(width, height);
        raster.fill_rect(0, 0, width, height, state.value(), PREVIEW_ALPHA);
        Placed {
            x: c1 * cs,
            y: r1 * cs,
            raster,
        }
    }
}

fn minmax(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
