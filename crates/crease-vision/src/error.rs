//! Error types for vision operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for vision operations.
pub type VisionResult<T> = Result<T, VisionError>;

/// Errors that can occur during feature extraction and classification.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Feature extraction failed: {0}")]
    FeatureExtraction(String),

    #[error("Feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No valid training data extracted")]
    NoTrainingData,

    #[error("Classifier is not trained")]
    NotTrained,

    #[error("Template load failed for {path}: {message}")]
    TemplateLoad { path: PathBuf, message: String },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VisionError {
    /// Create a feature extraction error.
    pub fn feature_extraction(message: impl Into<String>) -> Self {
        Self::FeatureExtraction(message.into())
    }

    /// Create a template load error.
    pub fn template_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TemplateLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
