//! Cohen's kappa (per-label and multi-class) over an epoch-sampled or
//! direct-label confusion matrix (spec.md §4.5).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::epoch::{augment, sample_times};
use crate::error::{CoreResult, duration_missing};
use crate::model::{AnnotationFile, event_order};
use nedc_config::IraParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IraResult {
    pub confusion_matrix: HashMap<String, HashMap<String, u64>>,
    pub per_label_kappa: HashMap<String, f64>,
    pub multi_class_kappa: f64,
}

fn confusion_from_labels(ref_seq: &[String], hyp_seq: &[String]) -> HashMap<String, HashMap<String, u64>> {
    let mut matrix: HashMap<String, HashMap<String, u64>> = HashMap::new();
    for (r, h) in ref_seq.iter().zip(hyp_seq.iter()) {
        *matrix.entry(r.clone()).or_default().entry(h.clone()).or_insert(0) += 1;
    }
    matrix
}

/// Score two label sequences directly (no sampling).
pub fn score_labels(ref_labels: &[String], hyp_labels: &[String]) -> IraResult {
    let matrix = confusion_from_labels(ref_labels, hyp_labels);
    let result = finish(matrix);
    tracing::debug!(multi_class_kappa = result.multi_class_kappa, "ira scored");
    result
}

/// Score two event streams by epoch-sampling them identically to
/// [`crate::epoch::score`] (gap augmentation, inclusive-boundary midpoint
/// sampling) but WITHOUT joint compression — every sampled pair is counted.
///
/// Returns `CoreReason::DurationMissing` if `file_duration` is non-positive
/// (spec.md §7), the same requirement [`crate::epoch::score`] enforces.
pub fn score_events(
    reference: &AnnotationFile,
    hypothesis: &AnnotationFile,
    file_duration: f64,
    params: &IraParams,
) -> CoreResult<IraResult> {
    if file_duration <= 0.0 {
        return Err(duration_missing());
    }

    let mut ref_events = reference.events().to_vec();
    ref_events.sort_by(event_order);
    let mut hyp_events = hypothesis.events().to_vec();
    hyp_events.sort_by(event_order);

    let ref_aug = augment(&ref_events, file_duration, &params.null_class);
    let hyp_aug = augment(&hyp_events, file_duration, &params.null_class);

    let times = sample_times(file_duration, params.epoch_duration);
    let ref_seq: Vec<String> = times
        .iter()
        .map(|&t| {
            ref_aug
                .iter()
                .find(|e| e.covers(t))
                .map(|e| e.label.clone())
                .unwrap_or_default()
        })
        .collect();
    let hyp_seq: Vec<String> = times
        .iter()
        .map(|&t| {
            hyp_aug
                .iter()
                .find(|e| e.covers(t))
                .map(|e| e.label.clone())
                .unwrap_or_default()
        })
        .collect();

    Ok(score_labels(&ref_seq, &hyp_seq))
}

fn finish(matrix: HashMap<String, HashMap<String, u64>>) -> IraResult {
    let mut labels: HashSet<String> = HashSet::new();
    for (r, row) in &matrix {
        labels.insert(r.clone());
        for h in row.keys() {
            labels.insert(h.clone());
        }
    }
    let labels: Vec<String> = {
        let mut v: Vec<String> = labels.into_iter().collect();
        v.sort();
        v
    };

    let cell = |r: &str, h: &str| -> f64 {
        matrix
            .get(r)
            .and_then(|row| row.get(h))
            .copied()
            .unwrap_or(0) as f64
    };

    let mut per_label_kappa = HashMap::new();
    for l in &labels {
        let a = cell(l, l);
        let b: f64 = labels.iter().filter(|h| *h != l).map(|h| cell(l, h)).sum();
        let c: f64 = labels.iter().filter(|r| *r != l).map(|r| cell(r, l)).sum();
        let d: f64 = labels
            .iter()
            .filter(|r| *r != l)
            .flat_map(|r| labels.iter().filter(|h| *h != l).map(move |h| cell(r, h)))
            .sum();
        let n = a + b + c + d;
        let kappa = if n <= 0.0 {
            0.0
        } else {
            let p_o = (a + d) / n;
            let p_yes = ((a + b) / n) * ((a + c) / n);
            let p_no = ((c + d) / n) * ((b + d) / n);
            let p_e = p_yes + p_no;
            let denom = 1.0 - p_e;
            let numer = p_o - p_e;
            if denom.abs() < 1e-12 {
                if numer.abs() < 1e-12 { 1.0 } else { 0.0 }
            } else {
                numer / denom
            }
        };
        per_label_kappa.insert(l.clone(), kappa);
    }

    let mut row_sum: HashMap<&str, f64> = HashMap::new();
    let mut col_sum: HashMap<&str, f64> = HashMap::new();
    let mut diag = 0.0_f64;
    let mut n = 0.0_f64;
    for r in &labels {
        for h in &labels {
            let v = cell(r, h);
            *row_sum.entry(r.as_str()).or_insert(0.0) += v;
            *col_sum.entry(h.as_str()).or_insert(0.0) += v;
            n += v;
            if r == h {
                diag += v;
            }
        }
    }
    let s: f64 = labels
        .iter()
        .map(|l| row_sum.get(l.as_str()).copied().unwrap_or(0.0) * col_sum.get(l.as_str()).copied().unwrap_or(0.0))
        .sum();
    let numerator = n * diag - s;
    let denominator = n * n - s;
    let multi_class_kappa = if denominator.abs() < 1e-12 {
        if numerator.abs() < 1e-12 { 1.0 } else { 0.0 }
    } else {
        numerator / denominator
    };

    IraResult {
        confusion_matrix: matrix,
        per_label_kappa,
        multi_class_kappa,
    }
}
