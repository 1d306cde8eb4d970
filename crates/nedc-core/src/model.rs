use std::cmp::Ordering;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreResult, invalid_input};

/// A labeled half-open time interval with a confidence score (spec.md §3).
///
/// Labels are lowercased at construction; all downstream comparisons are
/// plain string equality on the normalized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAnnotation {
    pub channel: String,
    pub start_time: f64,
    pub stop_time: f64,
    pub label: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

fn default_confidence() -> f64 {
    1.0
}

/// Mirrors [`EventAnnotation`]'s wire shape; deserializing routes through
/// [`EventAnnotation::new`] so label normalization and range checks apply
/// uniformly regardless of input source.
#[derive(Deserialize)]
struct EventAnnotationWire {
    channel: String,
    start_time: f64,
    stop_time: f64,
    label: String,
    #[serde(default = "default_confidence")]
    confidence: f64,
}

impl<'de> Deserialize<'de> for EventAnnotation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = EventAnnotationWire::deserialize(deserializer)?;
        EventAnnotation::new(wire.channel, wire.start_time, wire.stop_time, wire.label, wire.confidence)
            .map_err(serde::de::Error::custom)
    }
}

impl EventAnnotation {
    /// Construct a validated event. Lowercases `label`; rejects negative
    /// times, `stop_time < start_time`, and out-of-range confidence.
    pub fn new(
        channel: impl Into<String>,
        start_time: f64,
        stop_time: f64,
        label: impl Into<String>,
        confidence: f64,
    ) -> CoreResult<Self> {
        if start_time < 0.0 || stop_time < 0.0 {
            return Err(invalid_input(format!(
                "negative event time: start={start_time}, stop={stop_time}"
            )));
        }
        if stop_time < start_time {
            return Err(invalid_input(format!(
                "stop_time {stop_time} < start_time {start_time}"
            )));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(invalid_input(format!(
                "confidence {confidence} outside [0,1]"
            )));
        }
        Ok(Self {
            channel: channel.into(),
            start_time,
            stop_time,
            label: label.into().to_lowercase(),
            confidence,
        })
    }

    /// Duration of the event span, `stop_time - start_time`.
    pub fn duration(&self) -> f64 {
        self.stop_time - self.start_time
    }

    /// Strict overlap test (spec.md §3): `a.stop > b.start && a.start < b.stop`.
    /// No guard band; touching endpoints do not overlap.
    pub fn overlaps(&self, other: &EventAnnotation) -> bool {
        self.stop_time > other.start_time && self.start_time < other.stop_time
    }

    /// `true` if `t` falls within `[start_time, stop_time]`, both bounds
    /// inclusive (the Epoch/IRA sampling convention, spec.md §4.4).
    pub fn covers(&self, t: f64) -> bool {
        self.start_time <= t && t <= self.stop_time
    }
}

/// Fixed ordering used whenever events must be sorted: by `start_time`,
/// ties broken by `stop_time`, then by `label` (spec.md §5's ordering
/// guarantee — TAES's active-flag bookkeeping depends on this being fixed).
pub fn event_order(a: &EventAnnotation, b: &EventAnnotation) -> Ordering {
    a.start_time
        .partial_cmp(&b.start_time)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.stop_time
                .partial_cmp(&b.stop_time)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.label.cmp(&b.label))
}

/// An immutable, ordered annotation stream for one file (spec.md §3).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationFile {
    events: Vec<EventAnnotation>,
    pub duration: f64,
    #[serde(default)]
    pub source: Option<String>,
}

/// Mirrors [`AnnotationFile`]'s shape for deserialization only, so a JSON
/// fixture (spec.md §6) is routed through [`AnnotationFile::new`] rather
/// than bypassing its validation and sort order.
#[derive(Deserialize)]
struct AnnotationFileWire {
    events: Vec<EventAnnotation>,
    duration: f64,
    #[serde(default)]
    source: Option<String>,
}

impl<'de> Deserialize<'de> for AnnotationFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = AnnotationFileWire::deserialize(deserializer)?;
        AnnotationFile::new(wire.events, wire.duration, wire.source).map_err(serde::de::Error::custom)
    }
}

/// Tolerance for `stop_time <= duration` float noise (spec.md §3).
const DURATION_EPS: f64 = 1e-10;

impl AnnotationFile {
    /// Build an `AnnotationFile`, sorting events into the fixed order and
    /// validating that `duration > 0` and no event's `stop_time` exceeds it
    /// by more than float noise.
    pub fn new(
        mut events: Vec<EventAnnotation>,
        duration: f64,
        source: Option<String>,
    ) -> CoreResult<Self> {
        if duration < 0.0 {
            return Err(invalid_input(format!("negative file duration {duration}")));
        }
        for e in &events {
            if e.stop_time > duration + DURATION_EPS {
                return Err(invalid_input(format!(
                    "event stop_time {} exceeds file duration {duration}",
                    e.stop_time
                )));
            }
        }
        events.sort_by(event_order);
        Ok(Self {
            events,
            duration,
            source,
        })
    }

    /// Borrow the sorted events.
    pub fn events(&self) -> &[EventAnnotation] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events filtered to a given label (case-insensitive, already
    /// normalized), in sorted order.
    pub fn by_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a EventAnnotation> {
        self.events.iter().filter(move |e| e.label == label)
    }

    /// Plain label sequence, in sorted order — input to the DP scorer.
    pub fn labels(&self) -> Vec<String> {
        self.events.iter().map(|e| e.label.clone()).collect()
    }
}
