//! In-memory images that can be blitted onto a `Renderer2d`.
//!
//! - `RgbImage` is a camera-style frame: 3 bytes per pixel, no alpha, and an explicit memory
//!   layout because capture backends disagree on whether rows or columns are contiguous.
//! - `Sprite` is a small RGBA bitmap where alpha 0 means "skip this pixel".

use crate::graphics::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLayout {
    /// `data[(y * width + x) * 3]`, the layout every surface in this crate uses.
    #[default]
    RowMajor,
    /// `data[(x * height + y) * 3]`; axes swapped relative to the surface.
    ColumnMajor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let len = rgb_len(width, height);
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / 3 {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            layout: PixelLayout::RowMajor,
            data,
        }
    }

    /// Wraps raw RGB bytes. Returns `None` if `data` does not hold exactly `width * height`
    /// pixels.
    pub fn from_raw(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Option<Self> {
        if data.len() != rgb_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            layout,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let idx = match self.layout {
            PixelLayout::RowMajor => y * self.width as usize + x,
            PixelLayout::ColumnMajor => x * self.height as usize + y,
        };
        Some(idx * 3)
    }

    /// Pixel at logical `(x, y)`, independent of memory layout.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let i = self.index(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }

    /// Re-packs the pixels row-major. Logical pixels are unchanged.
    pub fn into_row_major(self) -> Self {
        if self.layout == PixelLayout::RowMajor {
            return self;
        }
        let mut out = Self::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(px) = self.pixel(x, y) {
                    out.put_pixel(x, y, px);
                }
            }
        }
        out
    }

    /// Fills a small square centred on a normalized `[0,1]` coordinate.
    pub fn mark_normalized(&mut self, nx: f32, ny: f32, radius: u32, rgb: [u8; 3]) {
        if self.is_empty() || !nx.is_finite() || !ny.is_finite() {
            return;
        }
        let cx = (nx.clamp(0.0, 1.0) * (self.width - 1) as f32).round() as u32;
        let cy = (ny.clamp(0.0, 1.0) * (self.height - 1) as f32).round() as u32;
        let x0 = cx.saturating_sub(radius);
        let y0 = cy.saturating_sub(radius);
        for y in y0..=cy.saturating_add(radius) {
            for x in x0..=cx.saturating_add(radius) {
                self.put_pixel(x, y, rgb);
            }
        }
    }
}

fn rgb_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(3)
}

/// A small RGBA bitmap drawn 1:1 at an integer position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Sprite {
    /// Builds a sprite from rows of palette indices. Index 0 is transparent; index `n` maps to
    /// `palette[n - 1]`. Rows shorter than the widest row are padded with transparency.
    pub fn from_palette_rows(rows: &[&str], palette: &[Color], scale: u32) -> Self {
        let scale = scale.max(1);
        let src_w = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let src_h = rows.len() as u32;
        let width = src_w * scale;
        let height = src_h * scale;
        let mut pixels = vec![[0u8; 4]; (width as usize) * (height as usize)];

        for (sy, row) in rows.iter().enumerate() {
            for (sx, ch) in row.chars().enumerate() {
                let color = ch
                    .to_digit(10)
                    .filter(|&d| d > 0)
                    .and_then(|d| palette.get(d as usize - 1).copied());
                let Some(color) = color else {
                    continue;
                };
                for dy in 0..scale {
                    for dx in 0..scale {
                        let x = sx as u32 * scale + dx;
                        let y = sy as u32 * scale + dy;
                        pixels[(y * width + x) as usize] = color;
                    }
                }
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_frames_read_the_same_logical_pixels() {
        // 2x1 image: left red, right blue. Column-major stores x-major.
        let data = vec![255, 0, 0, 0, 0, 255];
        let col = RgbImage::from_raw(2, 1, PixelLayout::ColumnMajor, data.clone()).unwrap();
        let row = RgbImage::from_raw(2, 1, PixelLayout::RowMajor, data).unwrap();
        assert_eq!(col.pixel(0, 0), row.pixel(0, 0));
        assert_eq!(col.pixel(1, 0), Some([0, 0, 255]));

        let repacked = col.into_row_major();
        assert_eq!(repacked.layout(), PixelLayout::RowMajor);
        assert_eq!(repacked.pixel(1, 0), Some([0, 0, 255]));
    }

    #[test]
    fn column_major_transposes_non_square_frames() {
        // 3 wide, 2 tall; column-major means each column's 2 pixels are contiguous.
        let mut data = Vec::new();
        for x in 0..3u8 {
            for y in 0..2u8 {
                data.extend_from_slice(&[x, y, 0]);
            }
        }
        let img = RgbImage::from_raw(3, 2, PixelLayout::ColumnMajor, data).unwrap();
        assert_eq!(img.pixel(2, 1), Some([2, 1, 0]));
        assert_eq!(img.pixel(0, 1), Some([0, 1, 0]));
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(RgbImage::from_raw(2, 2, PixelLayout::RowMajor, vec![0; 11]).is_none());
    }

    #[test]
    fn mark_normalized_clamps_to_frame() {
        let mut img = RgbImage::new(10, 10);
        img.mark_normalized(1.5, -1.0, 1, [255, 0, 0]);
        assert_eq!(img.pixel(9, 0), Some([255, 0, 0]));
        assert_eq!(img.pixel(8, 1), Some([255, 0, 0]));
        assert_eq!(img.pixel(0, 9), Some([0, 0, 0]));
    }

    #[test]
    fn sprite_palette_zero_is_transparent() {
        let sprite = Sprite::from_palette_rows(&["01", "1"], &[[1, 2, 3, 255]], 2);
        assert_eq!(sprite.width(), 4);
        assert_eq!(sprite.height(), 4);
        assert_eq!(sprite.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(sprite.pixel(2, 0), Some([1, 2, 3, 255]));
        assert_eq!(sprite.pixel(1, 3), Some([1, 2, 3, 255]));
        assert_eq!(sprite.pixel(3, 3), Some([0, 0, 0, 0]));
    }
}
