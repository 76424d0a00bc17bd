//! Error types for model parsing.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while parsing model values from their wire names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unsupported language code: {0}")]
    UnknownLanguage(String),

    #[error("Unknown shot label: {0}")]
    UnknownShot(String),

    #[error("Unknown boundary kind: {0}")]
    UnknownBoundary(String),

    #[error("Unknown dismissal mode: {0}")]
    UnknownDismissal(String),
}
