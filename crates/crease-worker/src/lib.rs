#![deny(unreachable_patterns)]
//! Match processing worker.
//!
//! This crate provides:
//! - Environment-driven worker configuration
//! - The match processor: frame source, detector, event engine, commentary
//! - Recorded track replay for running the pipeline without live models
//! - Offline shot classifier training
//! - Tracing setup and run-scoped logging

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod processor;
pub mod replay;
pub mod training;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use logging::{init_tracing, RunLogger};
pub use processor::{MatchProcessor, MatchReport};
pub use replay::{MatchTrack, TrackFile, TrackFrame};
pub use training::{load_dataset, train_from_dir};
