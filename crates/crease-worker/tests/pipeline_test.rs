//! End-to-end pipeline tests through the public API.

use std::fs;

use crease_models::{
    BoundaryKind, EventFamily, EventKind, FrameDetections, FrameSize, Position, ShotHint, ShotLabel,
};
use crease_vision::{
    FrameSource, NoShotHints, ObjectDetector, ShotHintProvider, SourceFrame, VisionError, VisionResult,
};
use crease_worker::{MatchProcessor, MatchTrack, WorkerConfig, WorkerError};
use mockall::mock;
use tempfile::TempDir;

mock! {
    pub Source {}

    impl FrameSource for Source {
        fn fps(&self) -> f64;
        fn next_frame(&mut self) -> VisionResult<Option<SourceFrame>>;
        fn name(&self) -> &'static str;
    }
}

mock! {
    pub Detector {}

    impl ObjectDetector for Detector {
        fn detect(&self, frame: &SourceFrame) -> VisionResult<FrameDetections>;
        fn name(&self) -> &'static str;
    }
}

mock! {
    pub Hints {}

    impl ShotHintProvider for Hints {
        fn shot_hint(&self, frame_index: u64) -> Option<ShotHint>;
        fn name(&self) -> &'static str;
    }
}

const SIZE: FrameSize = FrameSize {
    width: 1280,
    height: 720,
};

/// Source yielding `total` frames at 30 fps.
fn source(total: u64) -> MockSource {
    let mut source = MockSource::new();
    source.expect_fps().return_const(30.0);
    source.expect_name().return_const("mock_source");
    let mut next = 0u64;
    source.expect_next_frame().returning(move || {
        if next >= total {
            return Ok(None);
        }
        let frame = SourceFrame::new(next, SIZE);
        next += 1;
        Ok(Some(frame))
    });
    source
}

fn empty_detector() -> MockDetector {
    let mut detector = MockDetector::new();
    detector.expect_name().return_const("mock_detector");
    detector
        .expect_detect()
        .returning(|_| Ok(FrameDetections::default()));
    detector
}

fn processor() -> MatchProcessor {
    MatchProcessor::new(WorkerConfig::default().with_commentary_seed(42)).unwrap()
}

#[test]
fn test_detector_sees_only_sampled_frames() {
    let mut source = source(12);
    let mut detector = MockDetector::new();
    detector.expect_name().return_const("mock_detector");
    detector
        .expect_detect()
        .withf(|frame| frame.index % 3 == 0)
        .times(4)
        .returning(|_| Ok(FrameDetections::default()));

    let report = processor().process(&mut source, &detector, &NoShotHints).unwrap();
    assert_eq!(report.frames_read, 12);
    assert_eq!(report.frames_sampled, 4);
    assert!(report.events.is_empty());
    assert!(report.idle);
}

#[test]
fn test_big_shot_hint_implies_four() {
    let mut source = source(40);
    let detector = empty_detector();
    let mut hints = MockHints::new();
    hints.expect_name().return_const("mock_hints");
    hints.expect_shot_hint().returning(|frame| {
        (frame == 30).then(|| ShotHint::new(ShotLabel::PullShot, 0.9))
    });

    let report = processor().process(&mut source, &detector, &hints).unwrap();
    let events: Vec<_> = report.events.iter().collect();
    assert_eq!(events.len(), 2);

    assert_eq!(events[0].kind, EventKind::ShotPlayed(ShotLabel::PullShot));
    assert_eq!(events[0].frame, 30);
    assert!((events[0].timestamp - 1.0).abs() < 1e-9);

    assert_eq!(events[1].kind, EventKind::Boundary(BoundaryKind::Four));
    assert_eq!(events[1].frame, 45);
    assert!((events[1].timestamp - 1.5).abs() < 1e-9);
    assert!((events[1].confidence - 0.81).abs() < 1e-9);

    assert!(!report.idle);
    assert!(report.commentary.contains(' '));
}

#[test]
fn test_hint_on_unsampled_frame_is_reported() {
    let mut source = source(60);
    let detector = empty_detector();
    let mut hints = MockHints::new();
    hints.expect_name().return_const("mock_hints");
    hints.expect_shot_hint().times(60).returning(|frame| {
        (frame == 31).then(|| ShotHint::new(ShotLabel::CoverDrive, 0.8))
    });

    let report = processor().process(&mut source, &detector, &hints).unwrap();
    assert_eq!(report.frames_sampled, 20);
    let events: Vec<_> = report.events.iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::ShotPlayed(ShotLabel::CoverDrive));
    assert_eq!(events[0].frame, 31);
    assert!((events[0].timestamp - 31.0 / 30.0).abs() < 1e-9);
    assert!(!report.idle);
}

#[test]
fn test_provider_hint_beats_detector_hint() {
    let mut source = source(4);
    let mut detector = MockDetector::new();
    detector.expect_name().return_const("mock_detector");
    detector.expect_detect().returning(|frame| {
        let detections = FrameDetections::default();
        if frame.index == 3 {
            Ok(detections.with_shot_hint(ShotHint::new(ShotLabel::PullShot, 0.9)))
        } else {
            Ok(detections)
        }
    });
    let mut hints = MockHints::new();
    hints.expect_name().return_const("mock_hints");
    hints.expect_shot_hint().returning(|frame| {
        (frame == 3).then(|| ShotHint::new(ShotLabel::CoverDrive, 0.7))
    });

    let report = processor().process(&mut source, &detector, &hints).unwrap();
    let events: Vec<_> = report.events.iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::ShotPlayed(ShotLabel::CoverDrive));
    assert!((events[0].confidence - 0.7).abs() < 1e-9);
}

#[test]
fn test_detector_error_aborts_run() {
    let mut source = source(6);
    let mut detector = MockDetector::new();
    detector.expect_name().return_const("mock_detector");
    detector
        .expect_detect()
        .returning(|_| Err(VisionError::feature_extraction("detector offline")));

    let err = processor()
        .process(&mut source, &detector, &NoShotHints)
        .unwrap_err();
    assert!(matches!(err, WorkerError::Vision(_)));
}

#[test]
fn test_ball_into_stumps_is_bowled() {
    let mut source = source(30);
    let mut detector = MockDetector::new();
    detector.expect_name().return_const("mock_detector");
    detector.expect_detect().returning(|frame| {
        // Ball travels straight down the pitch towards stumps at (640, 600).
        let y = 300.0 + frame.index as f64 * 10.0;
        let stumps = crease_models::ObjectDetection::new(
            crease_models::ObjectClass::Stumps,
            crease_models::BoundingBox::new(630.0, 560.0, 20.0, 80.0),
            0.9,
        );
        Ok(FrameDetections::from_objects([stumps]).with_ball(Position::new(640.0, y), frame.timestamp(30.0)))
    });

    let report = processor().process(&mut source, &detector, &NoShotHints).unwrap();
    assert_eq!(report.events.count(EventFamily::Wicket), 1);
    let wicket = report
        .events
        .iter()
        .find(|e| e.family() == Some(EventFamily::Wicket))
        .unwrap();
    assert_eq!(wicket.kind.subtype_name(), Some("bowled"));
    // Wickets are not narrated by default.
    assert!(report.idle);
}

#[test]
fn test_replays_track_file() {
    let tmp = TempDir::new().unwrap();
    let frames: Vec<String> = (0..90)
        .step_by(3)
        .map(|i| {
            format!(
                r#"{{"index": {i}, "ball": {{"position": {{"x": {x}, "y": 500.0}}, "timestamp": 0.0}}}}"#,
                x = 640.0 + i as f64 * 10.0
            )
        })
        .collect();
    let json = format!(
        r#"{{"fps": 30.0, "frame_size": {{"width": 1280, "height": 720}}, "frames": [{}]}}"#,
        frames.join(",")
    );
    let path = tmp.path().join("track.json");
    fs::write(&path, json).unwrap();

    let mut track = MatchTrack::from_file(&path).unwrap();
    let recorded = track.clone();
    let report = processor().process(&mut track, &recorded, &recorded).unwrap();

    assert_eq!(report.source, "match_track");
    assert_eq!(report.events.count(EventFamily::Boundary), 1);
    let boundary = report.events.iter().next().unwrap();
    assert_eq!(boundary.kind, EventKind::Boundary(BoundaryKind::Four));
    assert_eq!(boundary.frame, 60);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["events"][0]["type"], "boundary");
    assert_eq!(value["events"][0]["subtype"], "four");
    assert_eq!(value["language"], "en");
}

#[test]
fn test_same_seed_same_report_commentary() {
    let hinted = || {
        let mut hints = MockHints::new();
        hints.expect_name().return_const("mock_hints");
        hints.expect_shot_hint().returning(|frame| {
            (frame == 0).then(|| ShotHint::new(ShotLabel::HookShot, 0.8))
        });
        hints
    };

    let a = processor()
        .process(&mut source(10), &empty_detector(), &hinted())
        .unwrap();
    let b = processor()
        .process(&mut source(10), &empty_detector(), &hinted())
        .unwrap();
    assert_eq!(a.commentary, b.commentary);
    assert_ne!(a.run_id, b.run_id);
}

#[test]
fn test_missing_model_fails_processor_setup() {
    let tmp = TempDir::new().unwrap();
    let config = WorkerConfig {
        model_path: Some(tmp.path().join("missing.json")),
        ..Default::default()
    };
    let err = MatchProcessor::from_config(config).unwrap_err();
    assert!(matches!(err, WorkerError::Vision(_)));
}

#[test]
fn test_template_dir_builds_untrained_classifier() {
    let tmp = TempDir::new().unwrap();
    let config = WorkerConfig {
        template_dir: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };
    let processor = MatchProcessor::from_config(config).unwrap();
    let classifier = processor.classifier().expect("classifier");
    assert!(!classifier.is_trained());
    assert!(classifier.templates().is_empty());
}
