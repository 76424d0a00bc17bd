//! Commentary transcript.

use std::fmt;

use crease_models::Language;
use serde::{Deserialize, Serialize};

/// One narrated line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub language: Language,
    pub text: String,
    /// Frame of the event the line narrates; `None` for the idle default line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
}

/// Ordered commentary lines for one video.
///
/// Built once by the synthesizer and handed to speech synthesis as a single
/// string. A transcript is never empty: with nothing to narrate it holds the
/// language's idle line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    language: Language,
    fragments: Vec<Fragment>,
    idle: bool,
}

impl Transcript {
    pub(crate) fn new(language: Language, fragments: Vec<Fragment>) -> Self {
        Self {
            language,
            fragments,
            idle: false,
        }
    }

    pub(crate) fn idle(language: Language, line: &str) -> Self {
        Self {
            language,
            fragments: vec![Fragment {
                language,
                text: line.to_string(),
                frame: None,
            }],
            idle: true,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// True when no event was narrated and the idle line stands in.
    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Fragments joined by single spaces, in narration order.
    pub fn text(&self) -> String {
        self.fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<Transcript> for String {
    fn from(transcript: Transcript) -> Self {
        transcript.text()
    }
}
