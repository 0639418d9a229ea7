use crate::{
    image::{RgbImage, Sprite},
    surface::SurfaceSize,
    ui::{Rect, Size},
};

pub type Color = [u8; 4];

pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Pixel extent of `text` in the block font, for centering.
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let mut widest = 0u32;
    let mut lines = 0u32;
    for line in text.split('\n') {
        lines += 1;
        let chars = line.chars().count() as u32;
        // No trailing gap after the last glyph.
        let w = (chars * glyph_advance_x(scale)).saturating_sub(scale);
        widest = widest.max(w);
    }
    let h = (lines * line_advance_y(scale)).saturating_sub(scale);
    Size::new(widest, h)
}

/// Unified 2D rendering interface.
///
/// Game code only talks to this trait; it must not care what owns the pixels underneath
/// (a `pixels` window, an in-memory test surface, ...).
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    /// Stretches `image` over `dest` (nearest neighbour), optionally mirrored left/right.
    fn blit_rgb(&mut self, dest: Rect, image: &RgbImage, mirror: bool);

    /// Draws `sprite` 1:1 with its top-left corner at `(x, y)`, clipped to the surface.
    fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite);

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn frame_ok(&self) -> bool {
        let expected = self.size.rgba_len();
        expected != 0 && self.frame.len() >= expected
    }

    /// Clips `rect` to the surface; `None` when empty or the frame is undersized.
    fn clip(&self, rect: Rect) -> Option<Rect> {
        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y || !self.frame_ok() {
            return None;
        }
        Some(Rect::new(rect.x, rect.y, max_x - rect.x, max_y - rect.y))
    }

    fn row_mut(&mut self, x: u32, y: u32, w: u32) -> &mut [Color] {
        let stride = self.size.width as usize * 4;
        let start = y as usize * stride + x as usize * 4;
        let end = start + w as usize * 4;
        bytemuck::cast_slice_mut(&mut self.frame[start..end])
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(r) = self.clip(rect) else {
            return;
        };
        for y in r.y..r.bottom() {
            self.row_mut(r.x, y, r.w).fill(color);
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        if alpha == 0 {
            return;
        }
        if alpha == 255 {
            self.fill_rect(rect, color);
            return;
        }
        let Some(r) = self.clip(rect) else {
            return;
        };

        let a = alpha as u32;
        let inv = 255u32 - a;
        for y in r.y..r.bottom() {
            for px in self.row_mut(r.x, y, r.w) {
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        let Some(r) = self.clip(rect) else {
            return;
        };

        // Top / bottom.
        self.fill_rect(Rect::new(r.x, r.y, r.w, 1), color);
        if r.h > 1 {
            self.fill_rect(Rect::new(r.x, r.bottom() - 1, r.w, 1), color);
        }

        // Left / right.
        self.fill_rect(Rect::new(r.x, r.y, 1, r.h), color);
        if r.w > 1 {
            self.fill_rect(Rect::new(r.right() - 1, r.y, 1, r.h), color);
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let lines = (0u32..).map(|n| y.saturating_add(n * line_advance_y(scale)));
        for (line, line_y) in text.split('\n').zip(lines) {
            if line_y >= self.size.height {
                break;
            }
            let columns = (0u32..).map(|n| x.saturating_add(n * glyph_advance_x(scale)));
            for (ch, glyph_x) in line.chars().zip(columns) {
                if glyph_x >= self.size.width {
                    break;
                }
                if ch != ' ' {
                    self.draw_char(glyph_x, line_y, ch, color, scale);
                }
            }
        }
    }

    fn blit_rgb(&mut self, dest: Rect, image: &RgbImage, mirror: bool) {
        if image.is_empty() || dest.w == 0 || dest.h == 0 {
            return;
        }
        let Some(r) = self.clip(dest) else {
            return;
        };

        let (iw, ih) = (image.width() as u64, image.height() as u64);
        for y in r.y..r.bottom() {
            let sy = ((y - dest.y) as u64 * ih / dest.h as u64) as u32;
            let row = self.row_mut(r.x, y, r.w);
            for (i, px) in row.iter_mut().enumerate() {
                let dx = (r.x - dest.x) as u64 + i as u64;
                let mut sx = (dx * iw / dest.w as u64) as u32;
                if mirror {
                    sx = image.width() - 1 - sx;
                }
                if let Some([red, green, blue]) = image.pixel(sx, sy) {
                    *px = [red, green, blue, 255];
                }
            }
        }
    }

    fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite) {
        if !self.frame_ok() {
            return;
        }
        let (sw, sh) = (self.size.width as i64, self.size.height as i64);
        for sy in 0..sprite.height() {
            let py = y as i64 + sy as i64;
            if py < 0 || py >= sh {
                continue;
            }
            for sx in 0..sprite.width() {
                let px = x as i64 + sx as i64;
                if px < 0 || px >= sw {
                    continue;
                }
                match sprite.pixel(sx, sy) {
                    Some(color) if color[3] != 0 => {
                        self.row_mut(px as u32, py as u32, 1)[0] = color;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl CpuRenderer<'_> {
    fn draw_char(&mut self, x: u32, y: u32, ch: char, color: Color, scale: u32) {
        let bits = glyph_bits(ch);
        let cells = GLYPH_W * GLYPH_H;
        for i in (0..cells).filter(|i| bits & (1 << (cells - 1 - i)) != 0) {
            let (row, col) = (i / GLYPH_W, i % GLYPH_W);
            let px = x.saturating_add(col * scale);
            let py = y.saturating_add(row * scale);
            self.fill_rect(Rect::new(px, py, scale, scale), color);
        }
    }
}

/// 3x5 glyphs packed row-major into the low 15 bits, top row in the highest bits.
const FONT: [(char, u16); 39] = [
    ('0', 0x7b6f), ('1', 0x2c97), ('2', 0x73e7), ('3', 0x73cf), ('4', 0x5bc9), ('5', 0x79cf),
    ('6', 0x79ef), ('7', 0x7249), ('8', 0x7bef), ('9', 0x7bcf), ('A', 0x2bed), ('B', 0x6bae),
    ('C', 0x7927), ('D', 0x6b6e), ('E', 0x79e7), ('F', 0x79e4), ('G', 0x796f), ('H', 0x5bed),
    ('I', 0x7497), ('J', 0x726a), ('K', 0x5d35), ('L', 0x4927), ('M', 0x5fed), ('N', 0x5ffd),
    ('O', 0x7b6f), ('P', 0x7be4), ('Q', 0x7b79), ('R', 0x7bf5), ('S', 0x79cf), ('T', 0x7492),
    ('U', 0x5b6f), ('V', 0x5b6a), ('W', 0x5bfd), ('X', 0x5aad), ('Y', 0x5a92), ('Z', 0x72a7),
    (':', 0x0410), ('-', 0x01c0), ('?', 0x7282),
];

const UNKNOWN_GLYPH: u16 = 0x7282;

fn glyph_bits(ch: char) -> u16 {
    let upper = ch.to_ascii_uppercase();
    FONT.iter()
        .find(|(c, _)| *c == upper)
        .map_or(UNKNOWN_GLYPH, |&(_, bits)| bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_size_counts_glyph_advances_without_trailing_gap() {
        // 3 glyphs at scale 2: 3 * 8 - 2.
        assert_eq!(text_size("ABC", 2), Size::new(22, 10));
        assert_eq!(text_size("A\nBB", 1), Size::new(7, 11));
    }

    #[test]
    fn lowercase_maps_to_capitals_and_unknowns_to_question_mark() {
        assert_eq!(glyph_bits('s'), glyph_bits('S'));
        assert_eq!(glyph_bits('%'), glyph_bits('?'));
        assert_eq!(glyph_bits('1').count_ones(), 8);
    }
}
