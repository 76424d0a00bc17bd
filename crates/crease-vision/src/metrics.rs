//! Pipeline metrics.
//!
//! Recording is a no-op until the host process installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_OBSERVED_TOTAL: &str = "crease_frames_observed_total";
    pub const EVENTS_EMITTED_TOTAL: &str = "crease_events_emitted_total";
    pub const EVENTS_SUPPRESSED_TOTAL: &str = "crease_events_suppressed_total";
    pub const FEATURE_FAILURES_TOTAL: &str = "crease_feature_failures_total";
    pub const CLASSIFICATION_DURATION_SECONDS: &str = "crease_classification_duration_seconds";
    pub const TRAINING_SAMPLES_TOTAL: &str = "crease_training_samples_total";
}

/// Record a frame handed to the event engine.
pub fn record_frame_observed(has_ball: bool) {
    let labels = [("has_ball", has_ball.to_string())];
    counter!(names::FRAMES_OBSERVED_TOTAL, &labels).increment(1);
}

/// Record an emitted event.
pub fn record_event(family: &str, source: &str) {
    let labels = [("family", family.to_string()), ("source", source.to_string())];
    counter!(names::EVENTS_EMITTED_TOTAL, &labels).increment(1);
}

/// Record a frame skipped by the refractory window.
pub fn record_suppressed() {
    counter!(names::EVENTS_SUPPRESSED_TOTAL).increment(1);
}

/// Record a per-frame feature extraction failure.
pub fn record_feature_failure(stage: &str) {
    let labels = [("stage", stage.to_string())];
    counter!(names::FEATURE_FAILURES_TOTAL, &labels).increment(1);
}

/// Record the time taken to classify a frame sequence.
pub fn record_classification(method: &str, duration_secs: f64) {
    let labels = [("method", method.to_string())];
    histogram!(names::CLASSIFICATION_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record the number of samples a classifier was fitted on.
pub fn record_training_samples(count: usize) {
    counter!(names::TRAINING_SAMPLES_TOTAL).increment(count as u64);
}
