//! Typed match events and the ordered event log.
//!
//! On the wire an event is the flat record
//! `{type, subtype, confidence, timestamp, frame}`; in memory the
//! `type`/`subtype` pair is a tagged [`EventKind`]. Event kinds this version
//! does not know survive a round trip as [`EventKind::Other`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::shot::ShotLabel;

/// Boundary outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// Along the ground.
    Four,
    /// Over the rope in the air.
    Six,
}

impl BoundaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Four => "four",
            BoundaryKind::Six => "six",
        }
    }
}

impl FromStr for BoundaryKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "four" | "4" => Ok(BoundaryKind::Four),
            "six" | "6" => Ok(BoundaryKind::Six),
            _ => Err(ModelError::UnknownBoundary(s.to_string())),
        }
    }
}

/// Mode of dismissal.
///
/// Kinematic inference only ever reports `Bowled`; the other modes arrive from
/// external sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DismissalMode {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
}

impl DismissalMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DismissalMode::Bowled => "bowled",
            DismissalMode::Caught => "caught",
            DismissalMode::Lbw => "lbw",
            DismissalMode::RunOut => "run_out",
            DismissalMode::Stumped => "stumped",
        }
    }
}

impl FromStr for DismissalMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bowled" => Ok(DismissalMode::Bowled),
            "caught" => Ok(DismissalMode::Caught),
            "lbw" => Ok(DismissalMode::Lbw),
            "run_out" => Ok(DismissalMode::RunOut),
            "stumped" => Ok(DismissalMode::Stumped),
            _ => Err(ModelError::UnknownDismissal(s.to_string())),
        }
    }
}

/// Event family, the unit the refractory window is reasoned about in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EventFamily {
    Boundary,
    Wicket,
    ShotPlayed,
}

impl EventFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventFamily::Boundary => "boundary",
            EventFamily::Wicket => "wicket",
            EventFamily::ShotPlayed => "shot_played",
        }
    }
}

impl fmt::Display for EventFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Boundary(BoundaryKind),
    Wicket(DismissalMode),
    ShotPlayed(ShotLabel),
    /// A kind this version does not understand, kept verbatim.
    Other {
        kind: String,
        subtype: Option<String>,
    },
}

impl EventKind {
    pub fn family(&self) -> Option<EventFamily> {
        match self {
            EventKind::Boundary(_) => Some(EventFamily::Boundary),
            EventKind::Wicket(_) => Some(EventFamily::Wicket),
            EventKind::ShotPlayed(_) => Some(EventFamily::ShotPlayed),
            EventKind::Other { .. } => None,
        }
    }

    /// Wire name of the `type` field.
    pub fn type_name(&self) -> &str {
        match self {
            EventKind::Other { kind, .. } => kind,
            known => known.family().map(|f| f.as_str()).unwrap_or_default(),
        }
    }

    /// Wire name of the `subtype` field.
    pub fn subtype_name(&self) -> Option<&str> {
        match self {
            EventKind::Boundary(kind) => Some(kind.as_str()),
            EventKind::Wicket(mode) => Some(mode.as_str()),
            EventKind::ShotPlayed(label) => Some(label.as_str()),
            EventKind::Other { subtype, .. } => subtype.as_deref(),
        }
    }

    fn from_wire(kind: String, subtype: Option<String>) -> Self {
        let sub = subtype.as_deref();
        let known = match kind.as_str() {
            "boundary" => sub
                .map_or(Ok(BoundaryKind::Four), |s| s.parse())
                .ok()
                .map(EventKind::Boundary),
            "wicket" => sub
                .map_or(Ok(DismissalMode::Bowled), |s| s.parse())
                .ok()
                .map(EventKind::Wicket),
            // Unknown strokes narrate with the generic pool.
            "shot_played" => Some(EventKind::ShotPlayed(
                sub.map_or(ShotLabel::Generic, |s| s.parse().unwrap_or(ShotLabel::Unknown)),
            )),
            _ => None,
        };
        known.unwrap_or_else(|| EventKind::Other { kind, subtype })
    }
}

/// Flat wire representation of an [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub confidence: f64,
    pub timestamp: f64,
    pub frame: u64,
}

/// An immutable, detected match event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRecord", into = "EventRecord")]
pub struct Event {
    pub kind: EventKind,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Seconds from the start of the video
    pub timestamp: f64,
    pub frame: u64,
}

impl Event {
    pub fn new(kind: EventKind, confidence: f64, timestamp: f64, frame: u64) -> Self {
        Self {
            kind,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp,
            frame,
        }
    }

    pub fn boundary(kind: BoundaryKind, confidence: f64, timestamp: f64, frame: u64) -> Self {
        Self::new(EventKind::Boundary(kind), confidence, timestamp, frame)
    }

    pub fn wicket(mode: DismissalMode, confidence: f64, timestamp: f64, frame: u64) -> Self {
        Self::new(EventKind::Wicket(mode), confidence, timestamp, frame)
    }

    pub fn shot_played(label: ShotLabel, confidence: f64, timestamp: f64, frame: u64) -> Self {
        Self::new(EventKind::ShotPlayed(label), confidence, timestamp, frame)
    }

    pub fn family(&self) -> Option<EventFamily> {
        self.kind.family()
    }
}

impl From<EventRecord> for Event {
    fn from(raw: EventRecord) -> Self {
        Event::new(
            EventKind::from_wire(raw.kind, raw.subtype),
            raw.confidence,
            raw.timestamp,
            raw.frame,
        )
    }
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        EventRecord {
            kind: event.kind.type_name().to_string(),
            subtype: event.kind.subtype_name().map(str::to_string),
            confidence: event.confidence,
            timestamp: event.timestamp,
            frame: event.frame,
        }
    }
}

/// Timestamp-ordered event sequence handed to commentary synthesis.
///
/// Insertion is stable: events with equal timestamps keep arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let idx = self
            .events
            .partition_point(|existing| existing.timestamp <= event.timestamp);
        self.events.insert(idx, event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events in a family.
    pub fn count(&self, family: EventFamily) -> usize {
        self.events
            .iter()
            .filter(|e| e.family() == Some(family))
            .count()
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut log = EventLog::new();
        log.extend(iter);
        log
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
