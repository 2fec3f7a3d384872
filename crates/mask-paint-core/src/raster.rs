//! Grayscale and overlay raster buffers.
//!
//! All rasters are row-major. The owned/borrowed pair (`GrayRaster` /
//! `GrayRasterView`) lets callers decode without copying and convert to
//! an owned buffer only when they need to keep the data around.

/// Errors raised when constructing a raster from raw parts.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    #[error("raster buffer length mismatch (expected {expected} bytes, got {got})")]
    LengthMismatch { expected: usize, got: usize },
}

/// Borrowed row-major grayscale raster, one byte per pixel.
#[derive(Clone, Copy, Debug)]
pub struct GrayRasterView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned row-major grayscale raster, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayRaster {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Borrowed row-major RGBA raster, four bytes per pixel.
///
/// This is the shape a display surface hands back when a painted canvas
/// is captured into a mask.
#[derive(Clone, Copy, Debug)]
pub struct RgbaRasterView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGBA, len = w*h*4
}

impl GrayRaster {
    /// Allocate a raster filled with a single value.
    pub fn new(width: usize, height: usize, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill; width * height],
        }
    }

    /// Wrap an existing buffer, checking the length invariant.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(RasterError::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Collapse an RGBA capture to grayscale: each pixel becomes the
    /// rounded mean of its RGB channels. Fully transparent pixels carry
    /// no meaningful color and map to white (255, i.e. unmasked).
    pub fn from_rgba(src: RgbaRasterView<'_>) -> Self {
        let mut data = Vec::with_capacity(src.width * src.height);
        for px in src.data.chunks_exact(4) {
            if px[3] == 0 {
                data.push(255);
            } else {
                let sum = px[0] as u32 + px[1] as u32 + px[2] as u32;
                data.push(((sum as f32) / 3.0).round() as u8);
            }
        }
        Self {
            width: src.width,
            height: src.height,
            data,
        }
    }

    /// Borrow this raster as a view.
    #[inline]
    pub fn view(&self) -> GrayRasterView<'_> {
        GrayRasterView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Grayscale + alpha raster handed to the display layer for compositing.
///
/// Alpha is derived as `255 - gray`, so black mask pixels composite
/// opaque and white pixels are transparent. The compositing boundary
/// treats alpha-zero pixels as having undefined color channels, so
/// "fully transparent" is clamped to alpha 1, never 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayRaster {
    pub width: usize,
    pub height: usize,
    pub gray: Vec<u8>,
    pub alpha: Vec<u8>,
}

impl OverlayRaster {
    /// Allocate a fully transparent (white, alpha 1) overlay.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            gray: vec![255; width * height],
            alpha: vec![1; width * height],
        }
    }

    /// Alpha for a grayscale value, clamped away from zero.
    #[inline]
    pub fn alpha_for(gray: u8) -> u8 {
        (255 - gray).max(1)
    }

    /// Fill a rectangle with a uniform gray/alpha pair, clipped to the
    /// raster bounds.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, gray: u8, alpha: u8) {
        let x0 = x.min(self.width);
        let x1 = (x.saturating_add(w)).min(self.width);
        let y1 = (y.saturating_add(h)).min(self.height);
        for row in y.min(self.height)..y1 {
            let start = row * self.width + x0;
            let end = row * self.width + x1;
            self.gray[start..end].fill(gray);
            self.alpha[start..end].fill(alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        let err = GrayRaster::from_vec(3, 2, vec![0; 5]).expect_err("short buffer");
        assert!(matches!(
            err,
            RasterError::LengthMismatch {
                expected: 6,
                got: 5
            }
        ));
        assert!(GrayRaster::from_vec(3, 2, vec![0; 6]).is_ok());
    }

    #[test]
    fn rgba_collapse_averages_and_maps_transparent_to_white() {
        // Two pixels: mid-gray opaque, arbitrary color fully transparent.
        let data = [10u8, 20, 30, 255, 99, 99, 99, 0];
        let gray = GrayRaster::from_rgba(RgbaRasterView {
            width: 2,
            height: 1,
            data: &data,
        });
        assert_eq!(gray.data, vec![20, 255]);
    }

    #[test]
    fn alpha_never_zero() {
        assert_eq!(OverlayRaster::alpha_for(0), 255);
        assert_eq!(OverlayRaster::alpha_for(254), 1);
        assert_eq!(OverlayRaster::alpha_for(255), 1);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut overlay = OverlayRaster::new(4, 3);
        overlay.fill_rect(2, 1, 10, 10, 0, 255);
        assert_eq!(overlay.gray[1 * 4 + 1], 255); // untouched
        assert_eq!(overlay.gray[1 * 4 + 2], 0);
        assert_eq!(overlay.alpha[2 * 4 + 3], 255);
        assert_eq!(overlay.alpha[0], 1); // row above untouched
    }
}
