//! Match processing: frames in, events and commentary out.
//!
//! Every `sample_rate`-th frame is run through the detector and the event
//! engine. Shot hints come from the external provider first, then from the
//! detector output, then from the processor's own classifier window.
//! Provider hints are read for every frame; a hint on an unsampled frame
//! is reported at its own frame without kinematic inference.

use std::collections::VecDeque;
use std::time::Instant;

use crease_commentary::{split_for_speech, CommentarySynthesizer, Transcript};
use crease_models::{Event, EventLog, Language, ShotHint};
use crease_vision::{
    EventConfig, EventEngine, FrameSource, ObjectDetector, ShotClassifier, ShotClassifierConfig,
    ShotHintProvider, TemplateLibrary,
};
use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::RunLogger;
use crate::metrics;

/// Outcome of processing one video.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub run_id: String,
    pub source: String,
    pub language: Language,
    /// Frames read from the source
    pub frames_read: u64,
    /// Frames handed to the event engine
    pub frames_sampled: u64,
    pub events: EventLog,
    pub commentary: String,
    /// True when nothing was narrated and the idle line stands in
    pub idle: bool,
    /// Commentary split for speech synthesis
    pub speech_chunks: Vec<String>,
}

/// Runs the detection, inference and commentary pipeline over a frame source.
#[derive(Debug, Clone)]
pub struct MatchProcessor {
    config: WorkerConfig,
    events: EventConfig,
    classifier: Option<ShotClassifier>,
}

impl MatchProcessor {
    /// Create a processor without a shot classifier.
    pub fn new(config: WorkerConfig) -> WorkerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            events: EventConfig::default(),
            classifier: None,
        })
    }

    /// Create a processor, loading the classifier named by the config.
    ///
    /// A classifier is built when a model path or a template directory is
    /// configured. A model that fails to load is an error; missing templates
    /// are skipped by the library loader.
    pub fn from_config(config: WorkerConfig) -> WorkerResult<Self> {
        let template_dir = config.template_dir.clone();
        let model_path = config.model_path.clone();
        let mut processor = Self::new(config)?;

        if template_dir.is_none() && model_path.is_none() {
            return Ok(processor);
        }

        let classifier_config = ShotClassifierConfig::default();
        let mut classifier = ShotClassifier::new(classifier_config.clone());
        if let Some(dir) = template_dir {
            let templates = TemplateLibrary::load_dir(&dir, classifier_config.templates.clone());
            info!(dir = %dir.display(), templates = templates.len(), "Shot templates loaded");
            classifier = classifier.with_templates(templates);
        }
        if let Some(path) = model_path {
            classifier.load_model(&path)?;
        }
        processor.classifier = Some(classifier);
        Ok(processor)
    }

    pub fn with_event_config(mut self, events: EventConfig) -> Self {
        self.events = events;
        self
    }

    pub fn with_classifier(mut self, classifier: ShotClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn classifier(&self) -> Option<&ShotClassifier> {
        self.classifier.as_ref()
    }

    /// Process every frame of `source` and narrate the detected events.
    ///
    /// Fails on a non-positive frame rate or when the source or detector
    /// fails; per-frame classification problems are logged and skipped.
    pub fn process(
        &self,
        source: &mut dyn FrameSource,
        detector: &dyn ObjectDetector,
        hints: &dyn ShotHintProvider,
    ) -> WorkerResult<MatchReport> {
        let run_id = Uuid::new_v4().to_string();
        let logger = RunLogger::new(&run_id, "match_processing");
        let _span = logger.create_span(source.name(), source.fps()).entered();
        let start = Instant::now();

        let result = self.run(source, detector, hints, &logger);
        match &result {
            Ok(report) => {
                metrics::record_run("success", start.elapsed().as_secs_f64());
                logger.log_completion(&format!(
                    "{} events from {} sampled frames",
                    report.events.len(),
                    report.frames_sampled
                ));
            }
            Err(e) => {
                metrics::record_run("failure", start.elapsed().as_secs_f64());
                logger.log_error(&e.to_string());
            }
        }
        result
    }

    fn run(
        &self,
        source: &mut dyn FrameSource,
        detector: &dyn ObjectDetector,
        hints: &dyn ShotHintProvider,
        logger: &RunLogger,
    ) -> WorkerResult<MatchReport> {
        let fps = source.fps();
        if fps.is_nan() || fps <= 0.0 {
            return Err(WorkerError::invalid_input(format!(
                "frame rate must be positive, got {}",
                fps
            )));
        }
        logger.log_start(&format!("detector={} hints={}", detector.name(), hints.name()));

        let mut engine = EventEngine::new(self.events.clone());
        let mut window: VecDeque<DynamicImage> = VecDeque::with_capacity(self.config.classify_window);
        let mut log = EventLog::new();
        let mut frames_read = 0u64;
        let mut frames_sampled = 0u64;

        while let Some(frame) = source.next_frame()? {
            frames_read += 1;
            let provided = hints.shot_hint(frame.index);
            if frame.index % self.config.sample_rate != 0 {
                if let Some(hint) = provided {
                    debug!(frame = frame.index, "Shot hint on unsampled frame");
                    let events = engine.shot_hint_events(hint, frame.index, frame.timestamp(fps));
                    for event in &events {
                        log_event(event);
                    }
                    log.extend(events);
                }
                continue;
            }
            frames_sampled += 1;
            metrics::record_frame_sampled();

            let timestamp = frame.timestamp(fps);
            let mut detections = detector.detect(&frame)?;

            let classifier_hint = match &frame.image {
                Some(image) => self.window_hint(&mut window, image, frame.index),
                None => None,
            };
            detections.shot_hint = provided.or(detections.shot_hint).or(classifier_hint);

            let events = engine.observe(frame.size, &detections, frame.index, timestamp);
            for event in &events {
                log_event(event);
            }
            log.extend(events);
        }

        logger.log_progress(&format!(
            "read {} frames, sampled {}, {} events",
            frames_read,
            frames_sampled,
            log.len()
        ));

        let transcript = self.narrate(log.as_slice());
        let commentary = transcript.text();
        let speech_chunks = split_for_speech(&commentary, self.config.speech_chunk_chars);

        Ok(MatchReport {
            run_id: logger.run_id().to_string(),
            source: source.name().to_string(),
            language: self.config.language,
            frames_read,
            frames_sampled,
            events: log,
            commentary,
            idle: transcript.is_idle(),
            speech_chunks,
        })
    }

    /// Push a sampled frame into the classifier window and classify it once full.
    ///
    /// The window is cleared after every classification, hinted or not.
    fn window_hint(
        &self,
        window: &mut VecDeque<DynamicImage>,
        image: &DynamicImage,
        frame_index: u64,
    ) -> Option<ShotHint> {
        let classifier = self.classifier.as_ref()?;
        window.push_back(image.clone());
        if window.len() < self.config.classify_window {
            return None;
        }

        let prediction = classifier.classify_frame_sequence(window.make_contiguous());
        window.clear();

        if !prediction.label.is_specific() || prediction.confidence < self.config.min_hint_confidence {
            debug!(
                frame = frame_index,
                shot = %prediction.label,
                confidence = prediction.confidence,
                "Classifier window below hint threshold"
            );
            return None;
        }

        metrics::record_classifier_hint(prediction.label.as_str());
        debug!(
            frame = frame_index,
            shot = %prediction.label,
            confidence = prediction.confidence,
            "Classifier shot hint"
        );
        Some(ShotHint::new(prediction.label, prediction.confidence))
    }

    fn narrate(&self, events: &[Event]) -> Transcript {
        let language = self.config.language;
        match self.config.commentary_seed {
            Some(seed) => CommentarySynthesizer::seeded(seed)
                .with_wicket_calls(self.config.wicket_calls)
                .generate_transcript(events, language),
            None => CommentarySynthesizer::new()
                .with_wicket_calls(self.config.wicket_calls)
                .generate_transcript(events, language),
        }
    }
}

fn log_event(event: &Event) {
    info!(
        frame = event.frame,
        timestamp = event.timestamp,
        kind = event.kind.type_name(),
        subtype = ?event.kind.subtype_name(),
        confidence = event.confidence,
        "Event detected"
    );
}
