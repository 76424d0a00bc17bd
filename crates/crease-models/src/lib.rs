//! Shared data models for the Crease pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Ball positions, bounding boxes and frame geometry
//! - Per-frame object detections and shot hints
//! - Shot labels and classifier predictions
//! - Typed match events and the timestamp-ordered event log
//! - Commentary languages

pub mod detection;
pub mod error;
pub mod event;
pub mod geometry;
pub mod language;
pub mod shot;

// Re-export common types
pub use detection::{BallObservation, FrameDetections, ObjectClass, ObjectDetection, ShotHint};
pub use error::{ModelError, ModelResult};
pub use event::{BoundaryKind, DismissalMode, Event, EventFamily, EventKind, EventLog, EventRecord};
pub use geometry::{BoundingBox, FrameSize, Position};
pub use language::Language;
pub use shot::{ShotLabel, ShotPrediction};
