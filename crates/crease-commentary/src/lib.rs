//! Template-driven cricket commentary.
//!
//! This crate provides:
//! - Per-language line pools (English, Hindi, Tamil) with English fallback
//! - A seedable synthesizer turning an event sequence into a transcript
//! - Sentence-aligned chunking of the transcript for speech synthesis

mod speech;
mod synthesizer;
mod templates;
mod transcript;

pub use speech::{split_for_speech, DEFAULT_MAX_CHARS};
pub use synthesizer::CommentarySynthesizer;
pub use templates::{BoundaryPools, Pool, ShotPools, TemplateTable};
pub use transcript::{Fragment, Transcript};
