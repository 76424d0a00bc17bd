//! Batting stroke labels and classifier predictions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Batting stroke label.
///
/// The first five variants are the strokes the visual classifier is trained
/// on. `StraightDrive`, `CutShot`, `HookShot` and `DefensiveShot` are only
/// produced by external shot-hint providers and exist so commentary can narrate
/// them. Unrecognized wire names deserialize as `Unknown`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ShotLabel {
    CoverDrive,
    PullShot,
    FlickShot,
    SweepShot,
    HelicopterShot,
    StraightDrive,
    CutShot,
    HookShot,
    DefensiveShot,
    Generic,
    #[serde(other)]
    Unknown,
}

impl ShotLabel {
    /// Strokes with reference templates and training footage.
    pub const CLASSIFIER_SHOTS: &'static [ShotLabel] = &[
        ShotLabel::CoverDrive,
        ShotLabel::PullShot,
        ShotLabel::FlickShot,
        ShotLabel::SweepShot,
        ShotLabel::HelicopterShot,
    ];

    /// Returns the label's wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotLabel::CoverDrive => "cover_drive",
            ShotLabel::PullShot => "pull_shot",
            ShotLabel::FlickShot => "flick_shot",
            ShotLabel::SweepShot => "sweep_shot",
            ShotLabel::HelicopterShot => "helicopter_shot",
            ShotLabel::StraightDrive => "straight_drive",
            ShotLabel::CutShot => "cut_shot",
            ShotLabel::HookShot => "hook_shot",
            ShotLabel::DefensiveShot => "defensive_shot",
            ShotLabel::Generic => "generic",
            ShotLabel::Unknown => "unknown",
        }
    }

    /// True for a named stroke (anything but `generic` and `unknown`).
    pub fn is_specific(&self) -> bool {
        !matches!(self, ShotLabel::Generic | ShotLabel::Unknown)
    }
}

impl fmt::Display for ShotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShotLabel {
    type Err = ModelError;

    /// Accepts snake_case, spaced ("cover drive") and hyphenated names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "cover_drive" | "cover" => Ok(ShotLabel::CoverDrive),
            "pull_shot" | "pull" => Ok(ShotLabel::PullShot),
            "flick_shot" | "flick" => Ok(ShotLabel::FlickShot),
            "sweep_shot" | "sweep" => Ok(ShotLabel::SweepShot),
            "helicopter_shot" | "helicopter" => Ok(ShotLabel::HelicopterShot),
            "straight_drive" => Ok(ShotLabel::StraightDrive),
            "cut_shot" | "cut" => Ok(ShotLabel::CutShot),
            "hook_shot" | "hook" => Ok(ShotLabel::HookShot),
            "defensive_shot" | "defensive" => Ok(ShotLabel::DefensiveShot),
            "generic" => Ok(ShotLabel::Generic),
            "unknown" => Ok(ShotLabel::Unknown),
            _ => Err(ModelError::UnknownShot(s.to_string())),
        }
    }
}

/// A shot label with its confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotPrediction {
    pub label: ShotLabel,
    pub confidence: f64,
}

impl ShotPrediction {
    pub fn new(label: ShotLabel, confidence: f64) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// The empty result: `("unknown", 0.0)`.
    pub fn unknown() -> Self {
        Self {
            label: ShotLabel::Unknown,
            confidence: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.label == ShotLabel::Unknown
    }
}

impl Default for ShotPrediction {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shot_parse() {
        assert_eq!("cover_drive".parse::<ShotLabel>().unwrap(), ShotLabel::CoverDrive);
        assert_eq!("cover drive".parse::<ShotLabel>().unwrap(), ShotLabel::CoverDrive);
        assert_eq!("Pull-Shot".parse::<ShotLabel>().unwrap(), ShotLabel::PullShot);
        assert_eq!("hook".parse::<ShotLabel>().unwrap(), ShotLabel::HookShot);
        assert!("reverse_scoop".parse::<ShotLabel>().is_err());
    }

    #[test]
    fn test_shot_serde_unknown_fallback() {
        let label: ShotLabel = serde_json::from_str("\"helicopter_shot\"").unwrap();
        assert_eq!(label, ShotLabel::HelicopterShot);

        let label: ShotLabel = serde_json::from_str("\"switch_hit\"").unwrap();
        assert_eq!(label, ShotLabel::Unknown);

        assert_eq!(serde_json::to_string(&ShotLabel::SweepShot).unwrap(), "\"sweep_shot\"");
    }

    #[test]
    fn test_prediction_clamps_confidence() {
        assert_eq!(ShotPrediction::new(ShotLabel::Generic, 1.7).confidence, 1.0);
        assert!(ShotPrediction::default().is_unknown());
    }
}
