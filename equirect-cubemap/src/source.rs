/// Read-only access to a decoded equirectangular panorama.
use image::RgbImage;

/// A random-access RGB raster whose width is expected to be twice its height.
/// The aspect ratio is assumed by the projection, not enforced.
pub trait EquirectSource {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Colour at column `x`, row `y`. Callers keep both in bounds.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];

    fn has_equirect_aspect(&self) -> bool {
        self.width() as u64 == 2 * self.height() as u64
    }
}

impl EquirectSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}
