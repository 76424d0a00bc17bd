//! Shot classification over short frame windows.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use crease_models::{ShotLabel, ShotPrediction};
use image::DynamicImage;
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::{FeatureConfig, ShotClassifierConfig};
use super::features::{FeatureExtractor, FeatureVector};
use super::forest::RandomForest;
use super::scaler::StandardScaler;
use super::template::TemplateLibrary;
use super::voting::aggregate_votes;
use crate::error::{VisionError, VisionResult};
use crate::metrics;

/// Everything needed to predict with a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Class index to label, in ascending label order.
    classes: Vec<ShotLabel>,
    features: FeatureConfig,
    dimension: usize,
    scaler: StandardScaler,
    forest: RandomForest,
}

impl TrainedModel {
    pub fn classes(&self) -> &[ShotLabel] {
        &self.classes
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn validate(&self) -> VisionResult<()> {
        let expected = self.features.feature_len();
        for actual in [self.dimension, self.scaler.dimension(), self.forest.n_features()] {
            if actual != expected {
                return Err(VisionError::dimension_mismatch(expected, actual));
            }
        }
        if self.forest.n_classes() != self.classes.len() {
            return Err(VisionError::dimension_mismatch(
                self.classes.len(),
                self.forest.n_classes(),
            ));
        }
        Ok(())
    }
}

/// Predicts a stroke label for a window of frames.
///
/// Uses the trained model when there is one, otherwise falls back to
/// template matching.
#[derive(Debug, Clone, Default)]
pub struct ShotClassifier {
    config: ShotClassifierConfig,
    extractor: FeatureExtractor,
    templates: TemplateLibrary,
    model: Option<TrainedModel>,
}

impl ShotClassifier {
    pub fn new(config: ShotClassifierConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config.features.clone()),
            templates: TemplateLibrary::new(config.templates.clone()),
            config,
            model: None,
        }
    }

    pub fn with_templates(mut self, templates: TemplateLibrary) -> Self {
        self.templates = templates;
        self
    }

    pub fn config(&self) -> &ShotClassifierConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_ref()
    }

    /// Describe one frame with this classifier's feature layout.
    pub fn extract_features(&self, frame: &DynamicImage) -> VisionResult<FeatureVector> {
        self.extractor.extract_features(frame)
    }

    /// Fit scaler and forest on labeled frames, replacing any previous model.
    ///
    /// Frames whose features cannot be extracted are logged and skipped.
    /// Returns the number of samples used; fails with
    /// [`VisionError::NoTrainingData`] (leaving the classifier unchanged) when
    /// no frame yields features.
    pub fn train(&mut self, labeled: &BTreeMap<ShotLabel, Vec<DynamicImage>>) -> VisionResult<usize> {
        let start = Instant::now();
        let extractor = &self.extractor;

        let mut rows: Vec<(ShotLabel, Vec<f32>)> = Vec::new();
        for (label, frames) in labeled {
            let extracted: Vec<VisionResult<FeatureVector>> =
                frames.par_iter().map(|frame| extractor.extract_features(frame)).collect();

            let mut count = 0;
            for result in extracted {
                match result {
                    Ok(features) => {
                        rows.push((*label, features.into_inner()));
                        count += 1;
                    }
                    Err(e) => {
                        warn!(shot = %label, error = %e, "Skipping training frame");
                        metrics::record_feature_failure("train");
                    }
                }
            }
            info!(shot = %label, frames = count, "Processed {} frames for {}", count, label);
        }

        if rows.is_empty() {
            return Err(VisionError::NoTrainingData);
        }

        let classes: Vec<ShotLabel> = {
            let mut seen: Vec<ShotLabel> = rows.iter().map(|(label, _)| *label).collect();
            seen.sort();
            seen.dedup();
            seen
        };
        let labels: Vec<usize> = rows
            .iter()
            .map(|(label, _)| classes.binary_search(label).unwrap_or_default())
            .collect();

        let dimension = self.extractor.dimension();
        let n = rows.len();
        let flat: Vec<f32> = rows.into_iter().flat_map(|(_, values)| values).collect();
        let mut samples = Array2::from_shape_vec((n, dimension), flat)
            .map_err(|e| VisionError::feature_extraction(e.to_string()))?;

        let scaler = StandardScaler::fit(&samples)?;
        scaler.transform_inplace(&mut samples)?;
        let forest = RandomForest::fit(&samples, &labels, classes.len(), &self.config.forest)?;

        self.model = Some(TrainedModel {
            classes,
            features: self.extractor.config().clone(),
            dimension,
            scaler,
            forest,
        });

        metrics::record_training_samples(n);
        info!(
            samples = n,
            duration_ms = start.elapsed().as_millis() as u64,
            "Shot classifier trained successfully with {} samples",
            n
        );
        Ok(n)
    }

    /// Predict one frame with the trained model.
    pub fn predict_frame(&self, frame: &DynamicImage) -> VisionResult<ShotPrediction> {
        let model = self.model.as_ref().ok_or(VisionError::NotTrained)?;
        let features = self.extractor.extract_features(frame)?;
        if features.len() != model.dimension {
            return Err(VisionError::dimension_mismatch(model.dimension, features.len()));
        }
        let scaled = model.scaler.transform(ArrayView1::from(features.as_slice()))?;
        let (class, probability) = model.forest.predict(scaled.view())?;
        let label = model.classes.get(class).copied().unwrap_or(ShotLabel::Unknown);
        Ok(ShotPrediction::new(label, probability as f64))
    }

    /// Classify a window of frames.
    ///
    /// An empty window, or one where no frame can be predicted, is unknown
    /// with zero confidence.
    pub fn classify_frame_sequence(&self, frames: &[DynamicImage]) -> ShotPrediction {
        if frames.is_empty() {
            return ShotPrediction::unknown();
        }
        let start = Instant::now();

        if self.model.is_none() {
            debug!("Model not trained, falling back to template matching");
            let prediction = self.templates.classify(frames);
            metrics::record_classification("template", start.elapsed().as_secs_f64());
            return prediction;
        }

        let mut votes = Vec::with_capacity(frames.len());
        for frame in frames {
            match self.predict_frame(frame) {
                Ok(prediction) => votes.push((prediction.label, prediction.confidence)),
                Err(e) => {
                    warn!(error = %e, "Skipping frame in shot classification");
                    metrics::record_feature_failure("classify");
                }
            }
        }

        let prediction = aggregate_votes(&votes);
        metrics::record_classification("model", start.elapsed().as_secs_f64());
        debug!(
            shot = %prediction.label,
            confidence = prediction.confidence,
            frames = frames.len(),
            usable = votes.len(),
            "Frame sequence classified"
        );
        prediction
    }

    /// Write the trained model as JSON.
    pub fn save_model(&self, path: impl AsRef<Path>) -> VisionResult<()> {
        let model = self.model.as_ref().ok_or(VisionError::NotTrained)?;
        let writer = BufWriter::new(File::create(path.as_ref())?);
        serde_json::to_writer(writer, model)?;
        info!(path = %path.as_ref().display(), "Shot model saved");
        Ok(())
    }

    /// Replace the current model with one saved by [`save_model`](Self::save_model).
    ///
    /// Feature extraction switches to the layout the model was trained with.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> VisionResult<()> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let model: TrainedModel = serde_json::from_reader(reader)?;
        model.validate()?;

        self.extractor = FeatureExtractor::new(model.features.clone());
        self.config.features = model.features.clone();
        info!(
            path = %path.as_ref().display(),
            classes = model.classes.len(),
            "Shot model loaded"
        );
        self.model = Some(model);
        Ok(())
    }
}
