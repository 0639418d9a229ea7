//! Stand-ins for camera hardware and a landmark model.

use std::cell::Cell;
use std::rc::Rc;

use engine::image::{PixelLayout, RgbImage};

use super::{DetectorError, FrameSource, HandDetector, HandLandmarks, LANDMARK_COUNT, Landmark, VideoFrame};

/// Generates a moving test pattern.
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    layout: PixelLayout,
    drop_every: u32,
    reads: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layout: PixelLayout::RowMajor,
            drop_every: 0,
            reads: 0,
        }
    }

    /// Emit frames in the given memory layout.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Every `n`th read returns no frame; `0` never drops.
    pub fn with_dropped_frames(mut self, n: u32) -> Self {
        self.drop_every = n;
        self
    }

    fn pattern(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width, self.height);
        let band = (self.reads % self.width.max(1) as u64) as u32;
        for y in 0..self.height {
            let shade = (y * 96 / self.height.max(1)) as u8;
            for x in 0..self.width {
                let rgb = if x == band {
                    [90, 90, 110]
                } else {
                    [30 + shade / 2, 40 + shade / 2, 60 + shade]
                };
                img.put_pixel(x, y, rgb);
            }
        }
        img
    }
}

impl FrameSource for SyntheticCamera {
    fn read(&mut self) -> Option<VideoFrame> {
        self.reads += 1;
        if self.drop_every > 0 && self.reads % self.drop_every as u64 == 0 {
            return None;
        }
        let img = self.pattern();
        match self.layout {
            PixelLayout::RowMajor => Some(img),
            PixelLayout::ColumnMajor => {
                let mut data = Vec::with_capacity(img.as_raw().len());
                for x in 0..self.width {
                    for y in 0..self.height {
                        data.extend_from_slice(&img.pixel(x, y).unwrap_or_default());
                    }
                }
                RgbImage::from_raw(self.width, self.height, PixelLayout::ColumnMajor, data)
            }
        }
    }
}

/// Shared handle used to move a [`PointerHand`] from the window's pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerHandle(Rc<Cell<Option<(f32, f32)>>>);

impl PointerHandle {
    /// Sets the hand position in display coordinates, or `None` to hide the hand.
    pub fn set(&self, pos: Option<(f32, f32)>) {
        self.0.set(pos);
    }

    pub fn get(&self) -> Option<(f32, f32)> {
        self.0.get()
    }
}

/// A detector that reports one hand wherever the pointer is.
///
/// The display mirrors the camera, so the pointer's `x` is flipped into image space.
#[derive(Debug, Clone, Default)]
pub struct PointerHand {
    handle: PointerHandle,
}

impl PointerHand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> PointerHandle {
        self.handle.clone()
    }
}

impl HandDetector for PointerHand {
    fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<HandLandmarks>, DetectorError> {
        let Some((sx, sy)) = self.handle.get() else {
            return Ok(Vec::new());
        };
        Ok(vec![splayed_hand(Landmark::new(1.0 - sx, sy))])
    }
}

/// Lays out a plausible open hand above the wrist, fingers fanned out.
fn splayed_hand(wrist: Landmark) -> HandLandmarks {
    let mut points = [wrist; LANDMARK_COUNT];
    for finger in 0..5 {
        let dx = (finger as f32 - 2.0) * 0.025;
        for joint in 0..4 {
            let reach = (joint + 1) as f32 * 0.03;
            points[1 + finger * 4 + joint] = Landmark::new(wrist.x + dx * (joint + 1) as f32, wrist.y - reach);
        }
    }
    HandLandmarks::new(points)
}

/// Replays a fixed list of wrist heights, one per detection; `None` entries mean "no hand".
///
/// Once the script runs out the hand is gone, unless built with [`ScriptedHand::cycling`].
#[derive(Debug, Clone)]
pub struct ScriptedHand {
    script: Vec<Option<f32>>,
    next: usize,
    cycle: bool,
}

impl ScriptedHand {
    pub fn new(script: impl IntoIterator<Item = Option<f32>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next: 0,
            cycle: false,
        }
    }

    /// A hand that is never there.
    pub fn absent() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn cycling(script: impl IntoIterator<Item = Option<f32>>) -> Self {
        Self {
            cycle: true,
            ..Self::new(script)
        }
    }

    /// A hand bobbing between `0.5 - amplitude` and `0.5 + amplitude` every `period` detections.
    pub fn sine(period: u32, amplitude: f32) -> Self {
        let period = period.max(1);
        let script = (0..period).map(|i| {
            let phase = i as f32 / period as f32 * std::f32::consts::TAU;
            Some(0.5 + amplitude * phase.sin())
        });
        Self::cycling(script)
    }
}

impl HandDetector for ScriptedHand {
    fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<HandLandmarks>, DetectorError> {
        if self.cycle && !self.script.is_empty() {
            self.next %= self.script.len();
        }
        let entry = self.script.get(self.next).copied().flatten();
        self.next = self.next.saturating_add(1);
        Ok(entry
            .map(|y| vec![HandLandmarks::at_wrist(Landmark::new(0.5, y))])
            .unwrap_or_default())
    }
}
