//! Worker configuration.

use std::path::PathBuf;

use crease_commentary::DEFAULT_MAX_CHARS;
use crease_models::Language;

use crate::error::{WorkerError, WorkerResult};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Commentary language
    pub language: Language,
    /// Inspect every n-th frame (default: 3)
    pub sample_rate: u64,
    /// Seed for commentary line choice; random when unset
    pub commentary_seed: Option<u64>,
    /// Narrate wicket events
    pub wicket_calls: bool,
    /// Sampled frames per classifier window (default: 15)
    pub classify_window: usize,
    /// Minimum classifier confidence for a window prediction to become a shot hint
    pub min_hint_confidence: f64,
    /// Directory with reference stroke templates
    pub template_dir: Option<PathBuf>,
    /// Trained classifier model (JSON)
    pub model_path: Option<PathBuf>,
    /// Speech chunk limit in characters
    pub speech_chunk_chars: usize,
    /// Install the Prometheus exporter
    pub metrics_enabled: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            sample_rate: 3,
            commentary_seed: None,
            wicket_calls: false,
            classify_window: 15,
            min_hint_confidence: 0.5,
            template_dir: None,
            model_path: None,
            speech_chunk_chars: DEFAULT_MAX_CHARS,
            metrics_enabled: false,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            language: std::env::var("CREASE_LANGUAGE")
                .map(|code| Language::from_code_or_default(&code))
                .unwrap_or(Language::En),
            sample_rate: std::env::var("CREASE_SAMPLE_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            commentary_seed: std::env::var("CREASE_COMMENTARY_SEED")
                .ok()
                .and_then(|s| s.parse().ok()),
            wicket_calls: std::env::var("CREASE_WICKET_CALLS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            classify_window: std::env::var("CREASE_CLASSIFY_WINDOW")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(15),
            min_hint_confidence: std::env::var("CREASE_MIN_HINT_CONFIDENCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.5),
            template_dir: std::env::var("CREASE_TEMPLATE_DIR").ok().map(PathBuf::from),
            model_path: std::env::var("CREASE_MODEL_PATH").ok().map(PathBuf::from),
            speech_chunk_chars: std::env::var("CREASE_SPEECH_CHUNK_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CHARS),
            metrics_enabled: std::env::var("CREASE_METRICS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: u64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_commentary_seed(mut self, seed: u64) -> Self {
        self.commentary_seed = Some(seed);
        self
    }

    pub fn with_classify_window(mut self, frames: usize) -> Self {
        self.classify_window = frames;
        self
    }

    /// Reject settings the processor cannot run with.
    pub fn validate(&self) -> WorkerResult<()> {
        if self.sample_rate == 0 {
            return Err(WorkerError::config_error("sample rate must be at least 1"));
        }
        if self.classify_window == 0 {
            return Err(WorkerError::config_error("classification window must be at least 1 frame"));
        }
        if self.speech_chunk_chars == 0 {
            return Err(WorkerError::config_error("speech chunk limit must be positive"));
        }
        if !(0.0..=1.0).contains(&self.min_hint_confidence) {
            return Err(WorkerError::config_error(format!(
                "minimum hint confidence {} outside [0, 1]",
                self.min_hint_confidence
            )));
        }
        Ok(())
    }
}
