//! Per-frame detections supplied by the object/ball detector.
//!
//! Detections are bucketed by class into a single record so event inference
//! never has to guess whether it was handed a list or a mapping.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Position};
use crate::shot::ShotLabel;

/// Object classes the detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Player,
    Ball,
    Stumps,
}

/// A single detected object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectDetection {
    pub class: ObjectClass,
    pub bbox: BoundingBox,
    /// Detection confidence [0, 1]
    pub confidence: f64,
}

impl ObjectDetection {
    pub fn new(class: ObjectClass, bbox: BoundingBox, confidence: f64) -> Self {
        Self {
            class,
            bbox,
            confidence,
        }
    }
}

/// Latest tracked ball position reported alongside the detections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BallObservation {
    pub position: Position,
    /// Timestamp in seconds
    pub timestamp: f64,
}

/// Pre-computed stroke hint from a pose/shot-hint provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotHint {
    pub label: ShotLabel,
    /// Provider confidence; event inference substitutes its default when absent.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl ShotHint {
    pub fn new(label: ShotLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: Some(confidence),
        }
    }
}

/// Everything known about one frame before event inference runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameDetections {
    #[serde(default)]
    pub players: Vec<ObjectDetection>,
    #[serde(default)]
    pub balls: Vec<ObjectDetection>,
    #[serde(default)]
    pub stumps: Vec<ObjectDetection>,
    /// Explicit ball position from a dedicated ball tracker.
    #[serde(default)]
    pub ball: Option<BallObservation>,
    #[serde(default)]
    pub shot_hint: Option<ShotHint>,
}

impl FrameDetections {
    /// Bucket a flat detector output by class.
    pub fn from_objects(objects: impl IntoIterator<Item = ObjectDetection>) -> Self {
        let mut detections = Self::default();
        for object in objects {
            match object.class {
                ObjectClass::Player => detections.players.push(object),
                ObjectClass::Ball => detections.balls.push(object),
                ObjectClass::Stumps => detections.stumps.push(object),
            }
        }
        detections
    }

    pub fn with_ball(mut self, position: Position, timestamp: f64) -> Self {
        self.ball = Some(BallObservation {
            position,
            timestamp,
        });
        self
    }

    pub fn with_shot_hint(mut self, hint: ShotHint) -> Self {
        self.shot_hint = Some(hint);
        self
    }

    /// Ball position for this frame.
    ///
    /// Prefers the explicit observation, then the center of the most
    /// confident `ball` detection.
    pub fn ball_position(&self) -> Option<Position> {
        if let Some(obs) = &self.ball {
            return Some(obs.position);
        }
        self.balls
            .iter()
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|ball| ball.bbox.center())
    }

    pub fn has_stumps(&self) -> bool {
        !self.stumps.is_empty()
    }
}
