//! Hand-position input.
//!
//! The game never talks to a camera or a landmark model directly. It pulls frames through
//! [`FrameSource`] and asks a [`HandDetector`] for landmarks; [`InputSampler`] turns that into at
//! most one normalized wrist height per tick. Simulated backends live in [`sim`].

pub mod sim;

use engine::image::RgbImage;
use thiserror::Error;

use crate::error::GameResult;

/// Landmarks per tracked hand.
pub const LANDMARK_COUNT: usize = 21;
/// Index of the wrist landmark, the only one the game consumes.
pub const WRIST: usize = 0;

/// Consecutive capture misses before a warning is logged.
const MISS_WARN_AFTER: u32 = 30;

const WRIST_MARK: [u8; 3] = [255, 64, 64];
const JOINT_MARK: [u8; 3] = [64, 255, 128];

/// A captured camera frame.
pub type VideoFrame = RgbImage;

/// A point in normalized image coordinates: `(0,0)` top-left, `(1,1)` bottom-right.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth; unused by the game.
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// A hand whose landmarks all sit on the wrist.
    pub fn at_wrist(wrist: Landmark) -> Self {
        Self {
            points: [wrist; LANDMARK_COUNT],
        }
    }

    pub fn wrist(&self) -> Landmark {
        self.points[WRIST]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

/// The detector failed outright (model crash, bad frame format, ...).
///
/// Finding no hands is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{backend}: {message}")]
pub struct DetectorError {
    pub backend: &'static str,
    pub message: String,
}

impl DetectorError {
    pub fn new(backend: &'static str, message: impl Into<String>) -> Self {
        Self {
            backend,
            message: message.into(),
        }
    }
}

/// Pull-based video source. `None` is a transient capture miss.
pub trait FrameSource {
    fn read(&mut self) -> Option<VideoFrame>;
}

pub trait HandDetector {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<HandLandmarks>, DetectorError>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn read(&mut self) -> Option<VideoFrame> {
        (**self).read()
    }
}

impl<T: HandDetector + ?Sized> HandDetector for Box<T> {
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<HandLandmarks>, DetectorError> {
        (**self).detect(frame)
    }
}

/// Produces one optional wrist height per call.
pub struct InputSampler<S, D> {
    source: S,
    detector: D,
    latest_frame: Option<VideoFrame>,
    consecutive_misses: u32,
}

impl<S: FrameSource, D: HandDetector> InputSampler<S, D> {
    pub fn new(source: S, detector: D) -> Self {
        Self {
            source,
            detector,
            latest_frame: None,
            consecutive_misses: 0,
        }
    }

    /// Pulls exactly one frame and returns the first hand's wrist `y`, if any.
    ///
    /// A missing frame or an empty detection is `Ok(None)`; only a detector fault is an error.
    pub fn sample(&mut self) -> GameResult<Option<f32>> {
        let Some(frame) = self.source.read() else {
            self.consecutive_misses = self.consecutive_misses.saturating_add(1);
            if self.consecutive_misses == MISS_WARN_AFTER {
                tracing::warn!(misses = MISS_WARN_AFTER, "video source keeps returning no frame");
            }
            return Ok(None);
        };
        if self.consecutive_misses >= MISS_WARN_AFTER {
            tracing::info!(misses = self.consecutive_misses, "video source recovered");
        }
        self.consecutive_misses = 0;

        let hands = self.detector.detect(&frame)?;

        let mut annotated = frame.into_row_major();
        for hand in &hands {
            for p in hand.points().iter().skip(WRIST + 1) {
                annotated.mark_normalized(p.x, p.y, 1, JOINT_MARK);
            }
            let wrist = hand.wrist();
            annotated.mark_normalized(wrist.x, wrist.y, 3, WRIST_MARK);
        }
        self.latest_frame = Some(annotated);

        let sample = hands.first().map(|h| h.wrist().y);
        tracing::trace!(hands = hands.len(), ?sample, "sampled input");
        Ok(sample)
    }

    /// The last captured frame with the detected landmarks drawn on it.
    pub fn latest_frame(&self) -> Option<&VideoFrame> {
        self.latest_frame.as_ref()
    }
}
