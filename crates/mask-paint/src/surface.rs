//! The display-surface collaborator contract.

use mask_paint_core::OverlayRaster;

/// The external drawing surface the editor renders through.
///
/// The editor never touches a windowing system itself; the host
/// implements this trait over whatever canvas it owns and composites
/// backdrop, committed mask and live preview bottom to top.
pub trait DisplaySurface {
    /// Size of the drawable area in display pixels, or `None` when the
    /// mount point the surface was asked to attach to does not exist.
    fn viewport(&self) -> Option<(f64, f64)>;

    /// Capture a rectangle of the surface as row-major RGBA bytes
    /// (4 per pixel), for importing painted content into a mask.
    fn get_color_raster(&self, x: usize, y: usize, width: usize, height: usize) -> Vec<u8>;

    /// Blit a grayscale+alpha raster at the given origin, replacing
    /// whatever was there.
    fn put_grayscale(&mut self, raster: &OverlayRaster, x: usize, y: usize);

    /// Composite a grayscale+alpha raster over the current content at
    /// the given global opacity.
    fn composite(&mut self, raster: &OverlayRaster, x: usize, y: usize, opacity: f32);
}
