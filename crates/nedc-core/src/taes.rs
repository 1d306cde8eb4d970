//! Time-Aligned Event Scoring — fractional, multi-overlap event scoring
//! (spec.md §4.1).

use serde::{Deserialize, Serialize};

use crate::model::{AnnotationFile, EventAnnotation, event_order};
use nedc_config::TaesParams;

/// Fractional true-positive / false-positive / false-negative counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TaesResult {
    pub tp: f64,
    pub fp: f64,
    pub fn_: f64,
}

/// `calc_hf` — fractional hit/false-alarm accounting for one ref/hyp pair
/// (spec.md §4.1 table). `D` is the reference event's span; the four cases
/// are checked in the order given there.
fn calc_hf(r: &EventAnnotation, h: &EventAnnotation) -> (f64, f64) {
    let d = r.duration();
    if d <= 0.0 {
        return (0.0, 0.0);
    }
    if h.start_time <= r.start_time && h.stop_time <= r.stop_time {
        // pre-prediction
        let hit = (h.stop_time - r.start_time) / d;
        let fa = ((r.start_time - h.start_time) / d).min(1.0);
        (hit, fa)
    } else if h.start_time >= r.start_time && h.stop_time >= r.stop_time {
        // post-prediction
        let hit = (r.stop_time - h.start_time) / d;
        let fa = ((h.stop_time - r.stop_time) / d).min(1.0);
        (hit, fa)
    } else if h.start_time < r.start_time && h.stop_time > r.stop_time {
        // over-prediction
        let hit = 1.0;
        let fa = (((h.stop_time - r.stop_time) + (r.start_time - h.start_time)) / d).min(1.0);
        (hit, fa)
    } else {
        // under-prediction: hyp entirely inside ref
        let hit = (h.stop_time - h.start_time) / d;
        (hit, 0.0)
    }
}

/// Score a hypothesis stream against a reference stream for `params.target_label`.
///
/// Inputs are filtered to the target label and processed in `event_order`.
/// Empty inputs yield `{0.0, 0.0, 0.0}`.
pub fn score(reference: &AnnotationFile, hypothesis: &AnnotationFile, params: &TaesParams) -> TaesResult {
    let mut refs: Vec<&EventAnnotation> = reference.by_label(&params.target_label).collect();
    let mut hyps: Vec<&EventAnnotation> = hypothesis.by_label(&params.target_label).collect();
    refs.sort_by(|a, b| event_order(a, b));
    hyps.sort_by(|a, b| event_order(a, b));

    let n_ref = refs.len();
    let n_hyp = hyps.len();
    let mut ref_active = vec![true; n_ref];
    let mut hyp_active = vec![true; n_hyp];

    let mut total_hit = 0.0_f64;
    let mut total_miss = 0.0_f64;
    let mut total_fa = 0.0_f64;

    for i in 0..n_ref {
        if !ref_active[i] {
            continue;
        }
        for j in 0..n_hyp {
            if !hyp_active[j] {
                continue;
            }
            if !refs[i].overlaps(hyps[j]) {
                continue;
            }

            if hyps[j].stop_time >= refs[i].stop_time {
                // Case A: hyp extends at or past ref.
                let (hit, fa) = calc_hf(refs[i], hyps[j]);
                let local_hit = hit;
                let mut local_miss = 1.0 - hit;
                let local_fa = fa;
                ref_active[i] = false;
                hyp_active[j] = false;

                for k in (i + 1)..n_ref {
                    if ref_active[k] && refs[k].overlaps(hyps[j]) {
                        local_miss += 1.0;
                        ref_active[k] = false;
                    }
                }

                total_hit += local_hit;
                total_miss += local_miss;
                total_fa += local_fa;
            } else {
                // Case B: ref extends past hyp.
                let (hit, fa) = calc_hf(refs[i], hyps[j]);
                let mut local_hit = hit;
                let mut local_miss = 1.0 - hit;
                let mut local_fa = fa;
                ref_active[i] = false;
                hyp_active[j] = false;

                for m in (j + 1)..n_hyp {
                    if hyp_active[m] && refs[i].overlaps(hyps[m]) {
                        let (h2, fa2) = calc_hf(refs[i], hyps[m]);
                        local_hit += h2;
                        local_miss -= h2;
                        local_fa += fa2;
                        hyp_active[m] = false;
                    }
                }

                total_hit += local_hit;
                total_miss += local_miss;
                total_fa += local_fa;
            }
            break;
        }
    }

    for active in &ref_active {
        if *active {
            total_miss += 1.0;
        }
    }
    for active in &hyp_active {
        if *active {
            total_fa += 1.0;
        }
    }

    tracing::debug!(tp = total_hit, fp = total_fa, fn_ = total_miss, "taes scored");

    TaesResult {
        tp: total_hit,
        fp: total_fa,
        fn_: total_miss,
    }
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

    const EPS: f64 = 1e-9;

    #[test]
    fn s1_under_prediction() {
        let r = file(vec![(100.0, 120.0, "seiz")], 200.0);
        let h = file(vec![(105.0, 115.0, "seiz")], 200.0);
        let res = score(&r, &h, &TaesParams::default());
        assert!((res.tp - 0.5).abs() < EPS);
        assert!((res.fp - 0.0).abs() < EPS);
        assert!((res.fn_ - 0.5).abs() < EPS);
    }

    #[test]
    fn s2_multi_ref_penalty() {
        let r = file(vec![(0.0, 10.0, "seiz"), (20.0, 30.0, "seiz")], 40.0);
        let h = file(vec![(5.0, 25.0, "seiz")], 40.0);
        let res = score(&r, &h, &TaesParams::default());
        assert!((res.tp - 0.5).abs() < EPS);
        assert!((res.fp - 1.0).abs() < EPS);
        assert!((res.fn_ - 1.5).abs() < EPS);
    }

    #[test]
    fn conservation_exact_match() {
        let r = file(
            vec![(0.0, 10.0, "seiz"), (20.0, 30.0, "seiz"), (40.0, 50.0, "seiz")],
            60.0,
        );
        let h = file(
            vec![(0.0, 10.0, "seiz"), (20.0, 30.0, "seiz"), (40.0, 50.0, "seiz")],
            60.0,
        );
        let res = score(&r, &h, &TaesParams::default());
        assert!((res.tp - 3.0).abs() < EPS);
        assert!((res.fp - 0.0).abs() < EPS);
        assert!((res.fn_ - 0.0).abs() < EPS);
    }

    #[test]
    fn empty_inputs_are_zero() {
        let r = file(vec![], 10.0);
        let h = file(vec![], 10.0);
        let res = score(&r, &h, &TaesParams::default());
        assert_eq!(res, TaesResult { tp: 0.0, fp: 0.0, fn_: 0.0 });
    }

    #[test]
    fn penalty_multi_ref_overlap() {
        // one hyp event overlapping K=3 ref events -> fn >= K - 1
        let r = file(
            vec![(0.0, 10.0, "seiz"), (10.0, 20.0, "seiz"), (20.0, 30.0, "seiz")],
            30.0,
        );
        let h = file(vec![(0.0, 30.0, "seiz")], 30.0);
        let res = score(&r, &h, &TaesParams::default());
        assert!(res.fn_ >= 2.0 - EPS);
    }
}
