#![deny(unreachable_patterns)]
//! Ball tracking, event inference and shot classification.
//!
//! This crate provides:
//! - A bounded ball trajectory with derived velocity and acceleration
//! - Kinematic event inference (boundaries, wickets, strokes) with a
//!   refractory window
//! - Stroke classification from frame windows, model-based or by template
//! - Collaborator traits for frame sources, detectors and shot-hint providers

pub mod collaborators;
pub mod error;
pub mod events;
pub mod metrics;
pub mod shot;
pub mod trajectory;

pub use collaborators::{FrameSource, NoShotHints, ObjectDetector, ShotHintProvider, SourceFrame};
pub use error::{VisionError, VisionResult};
pub use events::{EventConfig, EventEngine};
pub use shot::{
    FeatureConfig, FeatureExtractor, FeatureVector, ForestConfig, ShotClassifier,
    ShotClassifierConfig, TemplateConfig, TemplateLibrary,
};
pub use trajectory::{MotionSample, TrajectoryBuffer, TrajectorySample};
