//! Binary any-overlap event scoring (spec.md §4.2).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::AnnotationFile;

/// Per-label hit/miss/false-alarm counts. The positive-class view is
/// exposed via [`OverlapResult::tp`], [`OverlapResult::fp`], [`OverlapResult::fn_`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlapResult {
    pub hits: HashMap<String, u64>,
    pub misses: HashMap<String, u64>,
    pub false_alarms: HashMap<String, u64>,
}

impl OverlapResult {
    pub fn tp(&self, label: &str) -> u64 {
        *self.hits.get(label).unwrap_or(&0)
    }

    pub fn fp(&self, label: &str) -> u64 {
        *self.false_alarms.get(label).unwrap_or(&0)
    }

    pub fn fn_(&self, label: &str) -> u64 {
        *self.misses.get(label).unwrap_or(&0)
    }
}

/// Score any-overlap hits/misses/false-alarms per label.
///
/// For each reference event of label `L`, one hit if any same-label
/// hypothesis event overlaps it, else one miss. Independently, for each
/// hypothesis event of label `L`, one false alarm if no same-label
/// reference event overlaps it. A reference or hypothesis event can
/// contribute at most once regardless of how many overlaps it has.
pub fn score(reference: &AnnotationFile, hypothesis: &AnnotationFile) -> OverlapResult {
    let mut result = OverlapResult::default();

    for r in reference.events() {
        let matched = hypothesis
            .by_label(&r.label)
            .any(|h| h.overlaps(r));
        if matched {
            *result.hits.entry(r.label.clone()).or_insert(0) += 1;
        } else {
            *result.misses.entry(r.label.clone()).or_insert(0) += 1;
        }
    }

    for h in hypothesis.events() {
        let matched = reference.by_label(&h.label).any(|r| r.overlaps(h));
        if !matched {
            *result.false_alarms.entry(h.label.clone()).or_insert(0) += 1;
        }
    }

    tracing::debug!(
        hits = result.hits.values().sum::<u64>(),
        misses = result.misses.values().sum::<u64>(),
        false_alarms = result.false_alarms.values().sum::<u64>(),
        "overlap scored"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventAnnotation;

    fn file(events: Vec<(f64, f64, &str)>, duration: f64) -> AnnotationFile {
        let events = events
            .into_iter()
            .map(|(s, e, l)| EventAnnotation::new("TERM", s, e, l, 1.0).unwrap())
            .collect();
        AnnotationFile::new(events, duration, None).unwrap()
    }

    #[test]
    fn s3_simple() {
        let r = file(
            vec![(100.0, 120.0, "seiz"), (200.0, 220.0, "seiz")],
            300.0,
        );
        let h = file(
            vec![(110.0, 130.0, "seiz"), (250.0, 270.0, "seiz")],
            300.0,
        );
        let res = score(&r, &h);
        assert_eq!(res.tp("seiz"), 1);
        assert_eq!(res.fn_("seiz"), 1);
        assert_eq!(res.fp("seiz"), 1);
    }

    #[test]
    fn multiple_overlaps_count_once() {
        let r = file(vec![(0.0, 30.0, "seiz")], 30.0);
        let h = file(
            vec![(0.0, 10.0, "seiz"), (10.0, 20.0, "seiz"), (20.0, 30.0, "seiz")],
            30.0,
        );
        let res = score(&r, &h);
        assert_eq!(res.tp("seiz"), 1);
        assert_eq!(res.fp("seiz"), 0);
    }

    #[test]
    fn empty_inputs() {
        let r = file(vec![], 10.0);
        let h = file(vec![], 10.0);
        let res = score(&r, &h);
        assert!(res.hits.is_empty());
        assert!(res.misses.is_empty());
        assert!(res.false_alarms.is_empty());
    }
}
