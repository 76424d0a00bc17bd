//! Configuration for kinematic event inference.

use crease_models::ShotLabel;
use serde::{Deserialize, Serialize};

use crate::trajectory::DEFAULT_CAPACITY;

/// Tunables for the event inference engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    // === Trajectory ===
    /// Ball positions retained by the trajectory buffer (default: 30)
    pub trajectory_capacity: usize,

    /// Positions required before kinematic tests run (default: 5)
    pub min_history: usize,

    /// Minimum frame gap between two kinematic events, across all families (default: 30)
    pub refractory_frames: u64,

    // === Boundary ===
    /// Distance from a frame edge that counts as "at the rope" in pixels (default: 50)
    pub boundary_margin: f64,

    /// Variance of the last five y-coordinates below which a boundary is a four (default: 100)
    pub ground_variance_threshold: f64,

    // === Wicket ===
    /// Ball-to-stumps distance that counts as hitting the stumps in pixels (default: 50)
    pub wicket_distance: f64,

    // === Shot ===
    /// Direction change in degrees that signals a stroke (default: 30)
    pub shot_angle_degrees: f64,

    // === Confidences ===
    pub boundary_confidence: f64,
    pub wicket_confidence: f64,
    pub shot_confidence: f64,

    /// Confidence for a shot hint that arrives without one (default: 0.8)
    pub default_hint_confidence: f64,

    // === Shot hints ===
    /// Strokes that imply a four shortly after the shot (default: pull, hook)
    pub big_shots: Vec<ShotLabel>,

    /// Delay between a big shot and its implied boundary in seconds (default: 0.5)
    pub big_shot_boundary_delay_secs: f64,

    /// The same delay in frames (default: 15)
    pub big_shot_boundary_delay_frames: u64,

    /// Multiplier applied to the shot confidence for the implied boundary (default: 0.9)
    pub big_shot_confidence_discount: f64,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            trajectory_capacity: DEFAULT_CAPACITY,
            min_history: 5,
            refractory_frames: 30,
            boundary_margin: 50.0,
            ground_variance_threshold: 100.0,
            wicket_distance: 50.0,
            shot_angle_degrees: 30.0,
            boundary_confidence: 0.8,
            wicket_confidence: 0.7,
            shot_confidence: 0.6,
            default_hint_confidence: 0.8,
            big_shots: vec![ShotLabel::PullShot, ShotLabel::HookShot],
            big_shot_boundary_delay_secs: 0.5,
            big_shot_boundary_delay_frames: 15,
            big_shot_confidence_discount: 0.9,
        }
    }
}

impl EventConfig {
    pub fn with_refractory_frames(mut self, frames: u64) -> Self {
        self.refractory_frames = frames;
        self
    }

    pub fn with_boundary_margin(mut self, margin: f64) -> Self {
        self.boundary_margin = margin;
        self
    }

    pub fn with_trajectory_capacity(mut self, capacity: usize) -> Self {
        self.trajectory_capacity = capacity;
        self
    }

    pub fn with_big_shots(mut self, shots: Vec<ShotLabel>) -> Self {
        self.big_shots = shots;
        self
    }

    pub fn is_big_shot(&self, label: ShotLabel) -> bool {
        self.big_shots.contains(&label)
    }
}
