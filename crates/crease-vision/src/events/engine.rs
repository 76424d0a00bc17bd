//! Stateful per-video event inference.

use crease_models::{
    BoundaryKind, DismissalMode, Event, EventFamily, FrameDetections, FrameSize, ShotHint,
    ShotLabel,
};
use tracing::{debug, trace};

use super::config::EventConfig;
use super::heuristics;
use crate::metrics;
use crate::trajectory::TrajectoryBuffer;

const SOURCE_HINT: &str = "hint";
const SOURCE_KINEMATIC: &str = "kinematic";

/// Turns per-frame detections into typed match events.
///
/// One engine serves one video. Kinematic events share a single refractory
/// window across families; hinted events bypass it and do not reset it.
#[derive(Debug, Clone)]
pub struct EventEngine {
    config: EventConfig,
    trajectory: TrajectoryBuffer,
    last_event: Option<EventFamily>,
    last_event_frame: Option<u64>,
}

impl Default for EventEngine {
    fn default() -> Self {
        Self::new(EventConfig::default())
    }
}

impl EventEngine {
    pub fn new(config: EventConfig) -> Self {
        let trajectory = TrajectoryBuffer::new(config.trajectory_capacity);
        Self {
            config,
            trajectory,
            last_event: None,
            last_event_frame: None,
        }
    }

    pub fn config(&self) -> &EventConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &TrajectoryBuffer {
        &self.trajectory
    }

    /// Family and frame of the last kinematic event, if any.
    pub fn last_event(&self) -> Option<(EventFamily, u64)> {
        self.last_event.zip(self.last_event_frame)
    }

    /// Feed the frame's ball position into the trajectory, then infer events.
    pub fn observe(
        &mut self,
        frame: FrameSize,
        detections: &FrameDetections,
        frame_index: u64,
        timestamp: f64,
    ) -> Vec<Event> {
        let position = detections.ball_position();
        metrics::record_frame_observed(position.is_some());
        self.trajectory.update(position, frame_index);
        self.detect_events(frame, detections, frame_index, timestamp)
    }

    /// Infer events for one frame from the current trajectory.
    ///
    /// Does not touch the trajectory; use [`observe`](Self::observe) to
    /// update and detect in one step.
    pub fn detect_events(
        &mut self,
        frame: FrameSize,
        detections: &FrameDetections,
        frame_index: u64,
        timestamp: f64,
    ) -> Vec<Event> {
        let mut events = Vec::new();

        if let Some(hint) = detections.shot_hint {
            events.extend(self.shot_hint_events(hint, frame_index, timestamp));
        }

        if self.trajectory.len() < self.config.min_history {
            return events;
        }

        if self.in_refractory(frame_index) {
            trace!(frame = frame_index, "Inside refractory window");
            metrics::record_suppressed();
            return events;
        }

        let positions = self.trajectory.positions();

        if heuristics::is_boundary(&positions, frame, self.config.boundary_margin) {
            let kind = if heuristics::is_along_ground(&positions, self.config.ground_variance_threshold) {
                BoundaryKind::Four
            } else {
                BoundaryKind::Six
            };
            let event = Event::boundary(kind, self.config.boundary_confidence, timestamp, frame_index);
            self.emit_kinematic(event, &mut events);
        }

        // The first detected stumps are the reference wicket.
        if let Some(stumps) = detections.stumps.first() {
            if heuristics::is_wicket(&positions, &stumps.bbox, self.config.wicket_distance) {
                let event = Event::wicket(
                    DismissalMode::Bowled,
                    self.config.wicket_confidence,
                    timestamp,
                    frame_index,
                );
                self.emit_kinematic(event, &mut events);
            }
        }

        if heuristics::is_shot_played(&positions, self.config.shot_angle_degrees) {
            let event = Event::shot_played(
                ShotLabel::Generic,
                self.config.shot_confidence,
                timestamp,
                frame_index,
            );
            self.emit_kinematic(event, &mut events);
        }

        events
    }

    /// Events implied by a shot hint alone: the shot, plus a four for big shots.
    ///
    /// Leaves the trajectory and the refractory window untouched, so hints
    /// for frames that skip kinematic inference can still be reported.
    pub fn shot_hint_events(&self, hint: ShotHint, frame_index: u64, timestamp: f64) -> Vec<Event> {
        let mut out = Vec::with_capacity(2);
        let confidence = hint.confidence.unwrap_or(self.config.default_hint_confidence);
        let shot = Event::shot_played(hint.label, confidence, timestamp, frame_index);
        debug!(
            frame = frame_index,
            shot = %hint.label,
            confidence = shot.confidence,
            "Shot hint"
        );
        metrics::record_event(EventFamily::ShotPlayed.as_str(), SOURCE_HINT);
        out.push(shot);

        if self.config.is_big_shot(hint.label) {
            let boundary = Event::boundary(
                BoundaryKind::Four,
                confidence * self.config.big_shot_confidence_discount,
                timestamp + self.config.big_shot_boundary_delay_secs,
                frame_index + self.config.big_shot_boundary_delay_frames,
            );
            debug!(
                frame = boundary.frame,
                shot = %hint.label,
                "Implied boundary from big shot"
            );
            metrics::record_event(EventFamily::Boundary.as_str(), SOURCE_HINT);
            out.push(boundary);
        }
        out
    }

    fn in_refractory(&self, frame_index: u64) -> bool {
        self.last_event_frame
            .is_some_and(|last| frame_index.saturating_sub(last) < self.config.refractory_frames)
    }

    fn emit_kinematic(&mut self, event: Event, out: &mut Vec<Event>) {
        let family = event.family();
        debug!(
            frame = event.frame,
            kind = event.kind.type_name(),
            subtype = event.kind.subtype_name().unwrap_or_default(),
            confidence = event.confidence,
            "Event detected"
        );
        if let Some(family) = family {
            metrics::record_event(family.as_str(), SOURCE_KINEMATIC);
        }
        self.last_event = family;
        self.last_event_frame = Some(event.frame);
        out.push(event);
    }
}
