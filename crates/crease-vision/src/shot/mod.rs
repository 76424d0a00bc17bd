//! Stroke classification from frame windows.
//!
//! [`ShotClassifier`] extracts a [`FeatureVector`] per frame, standardizes
//! it and feeds a seeded [`RandomForest`]; per-frame predictions are merged by
//! weighted voting. Without a trained model it falls back to a
//! [`TemplateLibrary`].

mod classifier;
mod config;
mod features;
mod forest;
mod scaler;
mod template;
mod voting;

pub use classifier::{ShotClassifier, TrainedModel};
pub use config::{FeatureConfig, ForestConfig, ShotClassifierConfig, TemplateConfig};
pub use features::{FeatureExtractor, FeatureVector};
pub use forest::RandomForest;
pub use scaler::StandardScaler;
pub use template::{normalized_correlation, TemplateLibrary, TEMPLATE_FILES};
pub use voting::aggregate_votes;
