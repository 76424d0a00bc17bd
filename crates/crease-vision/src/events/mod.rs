//! Kinematic event inference over the ball trajectory.
//!
//! [`EventEngine`] owns the per-video state (trajectory and refractory
//! window); [`heuristics`] holds the stateless geometric tests it applies.

mod config;
mod engine;
pub mod heuristics;

pub use config::EventConfig;
pub use engine::EventEngine;
