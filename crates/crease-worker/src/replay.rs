//! Recorded match tracks.
//!
//! A track is a JSON file with the frame rate, frame size and per-frame
//! detections of a video, plus optional shot hints and a directory of
//! `frame_NNNN.jpg` stills. Replaying it drives the full pipeline without
//! a decoder or live models.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crease_models::{FrameDetections, FrameSize, ShotHint};
use crease_vision::{FrameSource, ObjectDetector, ShotHintProvider, SourceFrame, VisionResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{WorkerError, WorkerResult};

/// Longest track accepted for replay: a full day at 240 fps.
pub const MAX_FRAME_COUNT: u64 = 24 * 60 * 60 * 240;

/// Detections recorded for one frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackFrame {
    pub index: u64,
    #[serde(flatten)]
    pub detections: FrameDetections,
}

/// On-disk layout of a recorded track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackFile {
    pub fps: f64,
    pub frame_size: FrameSize,
    /// Total frames in the video; defaults to one past the last recorded frame
    #[serde(default)]
    pub frame_count: Option<u64>,
    #[serde(default)]
    pub frames: Vec<TrackFrame>,
    /// Shot hints keyed by frame index
    #[serde(default)]
    pub shot_hints: BTreeMap<u64, ShotHint>,
    /// Directory of `frame_NNNN.jpg` stills, relative to the track file
    #[serde(default)]
    pub image_dir: Option<PathBuf>,
}

/// A recorded track ready for replay.
///
/// Acts as frame source, object detector and shot-hint provider at once.
#[derive(Debug, Clone)]
pub struct MatchTrack {
    fps: f64,
    frame_size: FrameSize,
    frame_count: u64,
    detections: BTreeMap<u64, FrameDetections>,
    hints: BTreeMap<u64, ShotHint>,
    image_dir: Option<PathBuf>,
    cursor: u64,
}

impl MatchTrack {
    /// Load a track file. A relative `image_dir` resolves against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> WorkerResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let mut file: TrackFile = serde_json::from_str(&raw)?;
        if let (Some(dir), Some(parent)) = (&file.image_dir, path.parent()) {
            if dir.is_relative() {
                file.image_dir = Some(parent.join(dir));
            }
        }
        Self::from_track_file(file)
    }

    pub fn from_json(json: &str) -> WorkerResult<Self> {
        Self::from_track_file(serde_json::from_str(json)?)
    }

    pub fn from_track_file(file: TrackFile) -> WorkerResult<Self> {
        if file.fps.is_nan() || file.fps <= 0.0 {
            return Err(WorkerError::invalid_input(format!(
                "track frame rate must be positive, got {}",
                file.fps
            )));
        }

        let recorded = file
            .frames
            .iter()
            .map(|f| f.index.saturating_add(1))
            .max()
            .unwrap_or(0);
        let frame_count = file.frame_count.unwrap_or(recorded).max(recorded);
        if frame_count > MAX_FRAME_COUNT {
            return Err(WorkerError::invalid_input(format!(
                "track spans {} frames, limit is {}",
                frame_count, MAX_FRAME_COUNT
            )));
        }

        let mut detections = BTreeMap::new();
        for frame in file.frames {
            if detections.insert(frame.index, frame.detections).is_some() {
                warn!(frame = frame.index, "Duplicate track frame, keeping the last");
            }
        }

        Ok(Self {
            fps: file.fps,
            frame_size: file.frame_size,
            frame_count,
            detections,
            hints: file.shot_hints,
            image_dir: file.image_dir,
            cursor: 0,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_size(&self) -> FrameSize {
        self.frame_size
    }

    /// Rewind to the first frame.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    fn still_path(&self, index: u64) -> Option<PathBuf> {
        self.image_dir
            .as_ref()
            .map(|dir| dir.join(format!("frame_{:04}.jpg", index)))
    }
}

impl FrameSource for MatchTrack {
    fn fps(&self) -> f64 {
        self.fps
    }

    fn next_frame(&mut self) -> VisionResult<Option<SourceFrame>> {
        if self.cursor >= self.frame_count {
            return Ok(None);
        }
        let index = self.cursor;
        self.cursor += 1;

        let mut frame = SourceFrame::new(index, self.frame_size);
        if let Some(path) = self.still_path(index) {
            if path.exists() {
                match image::open(&path) {
                    Ok(image) => frame = frame.with_image(image),
                    Err(e) => warn!(path = %path.display(), error = %e, "Unreadable frame still"),
                }
            } else {
                debug!(frame = index, "No still for frame");
            }
        }
        Ok(Some(frame))
    }

    fn name(&self) -> &'static str {
        "match_track"
    }
}

impl ObjectDetector for MatchTrack {
    fn detect(&self, frame: &SourceFrame) -> VisionResult<FrameDetections> {
        Ok(self.detections.get(&frame.index).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "match_track"
    }
}

impl ShotHintProvider for MatchTrack {
    fn shot_hint(&self, frame_index: u64) -> Option<ShotHint> {
        self.hints.get(&frame_index).copied()
    }

    fn name(&self) -> &'static str {
        "match_track"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crease_models::ShotLabel;

    const TRACK: &str = r#"{
        "fps": 30.0,
        "frame_size": {"width": 1280, "height": 720},
        "frames": [
            {"index": 0, "ball": {"position": {"x": 640.0, "y": 360.0}, "timestamp": 0.0}},
            {"index": 3, "balls": [{"class": "ball", "bbox": {"x": 600.0, "y": 350.0, "width": 10.0, "height": 10.0}, "confidence": 0.9}]}
        ],
        "shot_hints": {"3": {"label": "pull_shot", "confidence": 0.85}}
    }"#;

    #[test]
    fn test_parses_track() {
        let track = MatchTrack::from_json(TRACK).unwrap();
        assert_eq!(track.frame_count(), 4);
        assert_eq!(track.frame_size(), FrameSize::new(1280, 720));
        assert_eq!(FrameSource::fps(&track), 30.0);
    }

    #[test]
    fn test_replays_all_frames_in_order() {
        let mut track = MatchTrack::from_json(TRACK).unwrap();
        let mut indices = Vec::new();
        while let Some(frame) = track.next_frame().unwrap() {
            assert!(frame.image.is_none());
            indices.push(frame.index);
        }
        assert_eq!(indices, vec![0, 1, 2, 3]);

        track.rewind();
        assert_eq!(track.next_frame().unwrap().map(|f| f.index), Some(0));
    }

    #[test]
    fn test_detections_and_hints_by_frame() {
        let track = MatchTrack::from_json(TRACK).unwrap();
        let frame = SourceFrame::new(3, track.frame_size());
        let detections = track.detect(&frame).unwrap();
        assert_eq!(detections.balls.len(), 1);
        assert!(detections.ball_position().is_some());

        let empty = track.detect(&SourceFrame::new(1, track.frame_size())).unwrap();
        assert!(empty.ball_position().is_none());

        let hint = track.shot_hint(3).unwrap();
        assert_eq!(hint.label, ShotLabel::PullShot);
        assert_eq!(hint.confidence, Some(0.85));
        assert!(track.shot_hint(0).is_none());
    }

    #[test]
    fn test_frame_count_extends_past_last_detection() {
        let json = r#"{"fps": 25.0, "frame_size": {"width": 640, "height": 480}, "frame_count": 50}"#;
        let track = MatchTrack::from_json(json).unwrap();
        assert_eq!(track.frame_count(), 50);
    }

    #[test]
    fn test_rejects_frame_index_at_u64_max() {
        let json = r#"{"fps": 30.0, "frame_size": {"width": 640, "height": 480},
            "frames": [{"index": 18446744073709551615}]}"#;
        let err = MatchTrack::from_json(json).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_oversized_frame_count() {
        let json = format!(
            r#"{{"fps": 30.0, "frame_size": {{"width": 640, "height": 480}}, "frame_count": {}}}"#,
            MAX_FRAME_COUNT + 1
        );
        let err = MatchTrack::from_json(&json).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidInput(_)));

        let json = format!(
            r#"{{"fps": 30.0, "frame_size": {{"width": 640, "height": 480}}, "frame_count": {}}}"#,
            MAX_FRAME_COUNT
        );
        assert_eq!(MatchTrack::from_json(&json).unwrap().frame_count(), MAX_FRAME_COUNT);
    }

    #[test]
    fn test_rejects_zero_fps() {
        let json = r#"{"fps": 0.0, "frame_size": {"width": 640, "height": 480}}"#;
        let err = MatchTrack::from_json(json).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidInput(_)));
    }
}
