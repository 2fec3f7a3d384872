//! Headless paint session: drives the editor with scripted gestures
//! over an in-memory surface and writes the resulting mask.
//!
//! Usage: `cargo run --example paint_session -- out.pgm`

use log::LevelFilter;
use mask_paint::{DisplaySurface, MaskEditor, OverlayRaster, PointerButton};

/// RGBA framebuffer standing in for a real canvas.
struct BufferSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>, // row-major RGBA
}

impl BufferSurface {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }
}

impl DisplaySurface for BufferSurface {
    fn viewport(&self) -> Option<(f64, f64)> {
        Some((self.width as f64, self.height as f64))
    }

    fn get_color_raster(&self, x: usize, y: usize, w: usize, h: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(w * h * 4);
        for row in y..y + h {
            let start = (row * self.width + x) * 4;
            out.extend_from_slice(&self.pixels[start..start + w * 4]);
        }
        out
    }

    fn put_grayscale(&mut self, raster: &OverlayRaster, x: usize, y: usize) {
        for row in 0..raster.height.min(self.height.saturating_sub(y)) {
            for col in 0..raster.width.min(self.width.saturating_sub(x)) {
                let src = row * raster.width + col;
                let dst = ((y + row) * self.width + x + col) * 4;
                let g = raster.gray[src];
                self.pixels[dst..dst + 4].copy_from_slice(&[g, g, g, raster.alpha[src]]);
            }
        }
    }

    fn composite(&mut self, raster: &OverlayRaster, x: usize, y: usize, opacity: f32) {
        for row in 0..raster.height.min(self.height.saturating_sub(y)) {
            for col in 0..raster.width.min(self.width.saturating_sub(x)) {
                let src = row * raster.width + col;
                let a = f32::from(raster.alpha[src]) / 255.0 * opacity;
                let dst = ((y + row) * self.width + x + col) * 4;
                for ch in 0..3 {
                    let below = f32::from(self.pixels[dst + ch]);
                    let above = f32::from(raster.gray[src]);
                    self.pixels[dst + ch] = (below + (above - below) * a).round() as u8;
                }
                self.pixels[dst + 3] = 255;
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    mask_paint::core::init_with_level(LevelFilter::Info)?;

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "mask.pgm".to_owned());

    let mut editor = MaskEditor::new(BufferSurface::new(640, 480), 18)?;

    // Freehand stroke across the top-left quadrant.
    editor.on_pointer_down(60.0, 60.0, PointerButton::Primary, false);
    for step in 1..=10 {
        editor.on_pointer_move(60.0 + f64::from(step) * 12.0, 60.0 + f64::from(step) * 6.0);
    }
    editor.on_pointer_up(180.0, 120.0, PointerButton::Primary);

    // Shift-drag area over the bottom-right quadrant.
    editor.on_pointer_down(400.0, 300.0, PointerButton::Primary, true);
    editor.on_pointer_move(600.0, 440.0);
    editor.on_pointer_up(600.0, 440.0, PointerButton::Primary);

    // Un-mask a hole inside that area with the secondary button.
    editor.on_pointer_down(480.0, 360.0, PointerButton::Secondary, true);
    editor.on_pointer_move(540.0, 400.0);
    editor.on_pointer_up(540.0, 400.0, PointerButton::Secondary);

    editor.save_mask(&out)?;
    log::info!("wrote mask to {out}");
    Ok(())
}
