use pixels::Pixels;

use crate::surface::{Surface, SurfaceSize};

/// Headful surface built on `pixels`.
///
/// The pixel buffer always matches the logical surface size; the game draws into it through
/// `surface::draw_frame` and `pixels` scales it to the window on present.
pub struct PixelsSurface {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsSurface {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(size.width, size.height)?;
        Ok(Self { pixels, size })
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// Resizes only the window-side surface; the logical buffer keeps its size so the
    /// playfield stays fixed and is scaled on present.
    pub fn resize_window(&mut self, width: u32, height: u32) -> Result<(), pixels::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }
}

impl Surface for PixelsSurface {
    type Error = pixels::Error;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error> {
        self.size = size;
        self.pixels.resize_buffer(size.width, size.height)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()
    }
}
