//! Interfaces to the components that feed the pipeline.
//!
//! Decoding, object detection and pose estimation are external; these traits
//! give them a uniform shape so recorded tracks, live models and test doubles
//! are interchangeable.

use crease_models::{FrameDetections, FrameSize, ShotHint};
use image::DynamicImage;

use crate::error::VisionResult;

/// One decoded frame.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    /// Zero-based position in the video.
    pub index: u64,
    pub size: FrameSize,
    /// Pixels, when the source has them. Recorded tracks may carry detections only.
    pub image: Option<DynamicImage>,
}

impl SourceFrame {
    pub fn new(index: u64, size: FrameSize) -> Self {
        Self {
            index,
            size,
            image: None,
        }
    }

    pub fn with_image(mut self, image: DynamicImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Seconds from the start of the video; zero when `fps` is not positive.
    pub fn timestamp(&self, fps: f64) -> f64 {
        if fps > 0.0 {
            self.index as f64 / fps
        } else {
            0.0
        }
    }
}

/// Ordered, finite sequence of decoded frames.
pub trait FrameSource: Send {
    /// Frames per second of the underlying video.
    fn fps(&self) -> f64;

    /// Next frame, or `None` once exhausted.
    fn next_frame(&mut self) -> VisionResult<Option<SourceFrame>>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}

/// Player, ball and stumps detection.
pub trait ObjectDetector: Send + Sync {
    /// Detect objects in one frame.
    ///
    /// The returned detections may also carry an explicit ball observation.
    fn detect(&self, frame: &SourceFrame) -> VisionResult<FrameDetections>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Pre-computed stroke labels, e.g. from a pose model.
pub trait ShotHintProvider: Send + Sync {
    /// Hint for the window ending at `frame_index`, if any.
    fn shot_hint(&self, frame_index: u64) -> Option<ShotHint>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// Provider that never hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoShotHints;

impl ShotHintProvider for NoShotHints {
    fn shot_hint(&self, _frame_index: u64) -> Option<ShotHint> {
        None
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
