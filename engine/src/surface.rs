use std::convert::Infallible;

use crate::graphics::{CpuRenderer, Renderer2d};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// A resizable RGBA surface.
///
/// This is the abstraction layer between:
/// - rendering (writing RGBA pixels into `frame_mut()`), and
/// - presentation (showing those pixels somewhere).
///
/// Works for both headful (windowed) and headless (offscreen) runs.
pub trait Surface {
    type Error;

    fn size(&self) -> SurfaceSize;
    fn frame_mut(&mut self) -> &mut [u8];

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error>;
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Runs `f` with a CPU renderer bound to the surface's current frame.
///
/// Nothing is presented; call `Surface::present` afterwards.
pub fn draw_frame<S, F, R>(surface: &mut S, f: F) -> R
where
    S: Surface + ?Sized,
    F: FnOnce(&mut dyn Renderer2d) -> R,
{
    let size = surface.size();
    let mut cpu = CpuRenderer::new(surface.frame_mut(), size);
    cpu.begin_frame(size);
    f(&mut cpu)
}

/// A simple in-memory RGBA surface for headless execution and tests.
#[derive(Debug, Clone)]
pub struct RgbaBufferSurface {
    size: SurfaceSize,
    buf: Vec<u8>,
    presented: u64,
}

impl RgbaBufferSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            buf: vec![0u8; size.rgba_len()],
            presented: 0,
        }
    }

    pub fn frame(&self) -> &[u8] {
        &self.buf
    }

    /// How many times `present` has been called.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = ((y as usize) * (self.size.width as usize) + x as usize) * 4;
        self.buf.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

impl Surface for RgbaBufferSurface {
    type Error = Infallible;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), Self::Error> {
        self.size = size;
        self.buf.resize(size.rgba_len(), 0u8);
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented += 1;
        Ok(())
    }
}
