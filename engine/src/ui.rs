//! Minimal layout primitives.
//!
//! Everything on screen is an axis-aligned pixel rect. Simulation code works in `f32` playfield
//! units, so this module also owns the conversion from a float rect (which may hang off any edge
//! of the surface) to a clipped pixel `Rect`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Rounds a float rect to pixels and clips it to `[0, bounds_w) x [0, bounds_h)`.
    ///
    /// Returns `None` when nothing of the rect remains visible (including NaN input).
    pub fn clip_f32(x: f32, y: f32, w: f32, h: f32, bounds_w: u32, bounds_h: u32) -> Option<Self> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return None;
        }
        let x0 = x.round().max(0.0);
        let y0 = y.round().max(0.0);
        let x1 = (x + w).round().min(bounds_w as f32);
        let y1 = (y + h).round().min(bounds_h as f32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            w: (x1 - x0) as u32,
            h: (y1 - y0) as u32,
        })
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Shrinks the rect by `insets` on each side; oversized insets collapse it to zero size.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            x: self.x.saturating_add(insets.left),
            y: self.y.saturating_add(insets.top),
            w: self.w.saturating_sub(insets.left.saturating_add(insets.right)),
            h: self.h.saturating_sub(insets.top.saturating_add(insets.bottom)),
        }
    }

    /// Positions a child of `size` inside this rect. Children larger than the rect are shrunk.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let (horizontal, vertical) = anchor.split();
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        Self {
            x: self.x + horizontal.offset(self.w - w),
            y: self.y + vertical.offset(self.h - h),
            w,
            h,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }
}

/// Alignment along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Start,
    Middle,
    End,
}

impl Align {
    fn offset(self, slack: u32) -> u32 {
        match self {
            Align::Start => 0,
            Align::Middle => slack / 2,
            Align::End => slack,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// (horizontal, vertical)
    fn split(self) -> (Align, Align) {
        use Align::*;
        match self {
            Anchor::TopLeft => (Start, Start),
            Anchor::TopCenter => (Middle, Start),
            Anchor::TopRight => (End, Start),
            Anchor::Center => (Middle, Middle),
            Anchor::BottomLeft => (Start, End),
            Anchor::BottomCenter => (Middle, End),
            Anchor::BottomRight => (End, End),
        }
    }
}
