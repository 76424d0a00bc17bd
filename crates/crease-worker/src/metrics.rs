//! Run-level metrics and the Prometheus recorder.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    pub const RUNS_TOTAL: &str = "crease_runs_total";
    pub const RUN_DURATION_SECONDS: &str = "crease_run_duration_seconds";
    pub const FRAMES_SAMPLED_TOTAL: &str = "crease_frames_sampled_total";
    pub const CLASSIFIER_HINTS_TOTAL: &str = "crease_classifier_hints_total";
}

/// Record a finished run.
pub fn record_run(status: &str, duration_secs: f64) {
    let labels = [("status", status.to_string())];
    counter!(names::RUNS_TOTAL, &labels).increment(1);
    histogram!(names::RUN_DURATION_SECONDS, &labels).record(duration_secs);
}

pub fn record_frame_sampled() {
    counter!(names::FRAMES_SAMPLED_TOTAL).increment(1);
}

/// Record a classifier window that produced a shot hint.
pub fn record_classifier_hint(label: &str) {
    let labels = [("label", label.to_string())];
    counter!(names::CLASSIFIER_HINTS_TOTAL, &labels).increment(1);
}
