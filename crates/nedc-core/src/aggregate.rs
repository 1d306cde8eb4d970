//! Multi-file aggregation (supplements spec.md — implied by §4.6/§4.7 and
//! the need to reduce scorer output across a corpus rather than one file).

use serde::{Deserialize, Serialize};

use crate::dp::DpResult;
use crate::epoch::EpochResult;
use crate::ira::IraResult;
use crate::metrics::Metrics;
use crate::overlap::OverlapResult;
use crate::taes::TaesResult;

/// One file pair's full scorer output, bundled for aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileResult {
    pub taes: TaesResult,
    pub overlap: OverlapResult,
    pub dp: DpResult,
    pub epoch: EpochResult,
    pub ira: IraResult,
    pub duration: f64,
}

/// Summed counts and recomputed derived metrics across a corpus, for one
/// scorer and one label of interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorerTotals {
    pub tp: f64,
    pub fp: f64,
    pub fn_: f64,
    pub metrics: Metrics,
}

/// The reduction of a corpus's per-file [`FileResult`]s into one report.
///
/// Totals are recomputed from summed counts, never averaged from per-file
/// metrics (spec.md §4.6/§8.10) — averaging rates across files of differing
/// length silently over-weights short files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub file_count: usize,
    pub total_duration: f64,
    pub taes: ScorerTotals,
    pub overlap: ScorerTotals,
    pub dp: ScorerTotals,
    pub epoch: ScorerTotals,
}

fn totals(tp: f64, fp: f64, fn_: f64, total_duration: f64, epoch_duration: Option<f64>) -> ScorerTotals {
    ScorerTotals {
        tp,
        fp,
        fn_,
        metrics: Metrics::from_counts(tp, fp, fn_, total_duration, epoch_duration),
    }
}

/// Sum `results` **in the order given** — callers must impose a fixed,
/// deterministic file order (e.g. sorted file identifiers) before calling;
/// this crate has no file identifiers of its own to sort by, only opaque
/// result records (spec.md §5, §9). `target_label` selects which row/column
/// of the overlap, DP, and epoch confusion data counts as the positive
/// class; TAES is already target-label-scoped by its own `TaesParams`.
/// `epoch_duration` is the sampling window the epoch scorer ran at, used to
/// scale its FA/24h (spec.md §4.4) — it has no effect on the other scorers.
pub fn aggregate(results: &[FileResult], target_label: &str, epoch_duration: f64) -> AggregateReport {
    let file_count = results.len();
    let total_duration: f64 = results.iter().map(|r| r.duration).sum();

    let taes_tp: f64 = results.iter().map(|r| r.taes.tp).sum();
    let taes_fp: f64 = results.iter().map(|r| r.taes.fp).sum();
    let taes_fn: f64 = results.iter().map(|r| r.taes.fn_).sum();

    let overlap_tp: f64 = results.iter().map(|r| r.overlap.tp(target_label) as f64).sum();
    let overlap_fp: f64 = results.iter().map(|r| r.overlap.fp(target_label) as f64).sum();
    let overlap_fn: f64 = results.iter().map(|r| r.overlap.fn_(target_label) as f64).sum();

    let dp_tp: f64 = results.iter().map(|r| r.dp.true_positives as f64).sum();
    let dp_fp: f64 = results.iter().map(|r| r.dp.false_positives as f64).sum();
    let dp_fn: f64 = results.iter().map(|r| r.dp.false_negatives as f64).sum();

    let epoch_tp: f64 = results.iter().map(|r| r.epoch.true_positives as f64).sum();
    let epoch_fp: f64 = results.iter().map(|r| r.epoch.false_positives as f64).sum();
    let epoch_fn: f64 = results.iter().map(|r| r.epoch.false_negatives as f64).sum();

    let report = AggregateReport {
        file_count,
        total_duration,
        taes: totals(taes_tp, taes_fp, taes_fn, total_duration, None),
        overlap: totals(overlap_tp, overlap_fp, overlap_fn, total_duration, None),
        dp: totals(dp_tp, dp_fp, dp_fn, total_duration, None),
        epoch: totals(epoch_tp, epoch_fp, epoch_fn, total_duration, Some(epoch_duration)),
    };

    tracing::debug!(file_count, total_duration, "aggregated corpus");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overlap_result(tp: u64, fp: u64, fn_: u64) -> OverlapResult {
        let mut hits = HashMap::new();
        hits.insert("seiz".to_string(), tp);
        let mut false_alarms = HashMap::new();
        false_alarms.insert("seiz".to_string(), fp);
        let mut misses = HashMap::new();
        misses.insert("seiz".to_string(), fn_);
        OverlapResult { hits, misses, false_alarms }
    }

    fn file_result(tp: f64, fp: f64, fn_: f64, duration: f64) -> FileResult {
        FileResult {
            taes: TaesResult { tp, fp, fn_ },
            overlap: overlap_result(tp as u64, fp as u64, fn_ as u64),
            dp: DpResult::default(),
            epoch: EpochResult::default(),
            ira: IraResult::default(),
            duration,
        }
    }

    #[test]
    fn sums_counts_not_averages_rates() {
        let a = file_result(10.0, 0.0, 0.0, 100.0); // perfect, short
        let b = file_result(0.0, 0.0, 10.0, 100.0); // all misses, short
        let report = aggregate(&[a, b], "seiz", 0.25);
        assert_eq!(report.taes.tp, 10.0);
        assert_eq!(report.taes.fn_, 10.0);
        // overall sensitivity is 0.5, not the 0.5 average of 1.0 and 0.0
        // that naive per-file averaging would also happen to give here —
        // the point is it's derived from the summed counts.
        assert!((report.taes.metrics.sensitivity - 0.5).abs() < 1e-9);
        assert_eq!(report.total_duration, 200.0);
    }

    #[test]
    fn duration_is_summed_not_maxed() {
        let a = file_result(1.0, 0.0, 0.0, 300.0);
        let b = file_result(1.0, 0.0, 0.0, 500.0);
        let report = aggregate(&[a, b], "seiz", 0.25);
        assert_eq!(report.total_duration, 800.0);
    }

    #[test]
    fn empty_corpus_is_all_zero() {
        let report = aggregate(&[], "seiz", 0.25);
        assert_eq!(report.file_count, 0);
        assert_eq!(report.total_duration, 0.0);
        assert_eq!(report.taes.metrics.sensitivity, 0.0);
    }

    #[test]
    fn order_independent_for_commutative_sums() {
        let a = file_result(3.0, 1.0, 2.0, 100.0);
        let b = file_result(5.0, 0.0, 1.0, 200.0);
        let fwd = aggregate(&[a.clone(), b.clone()], "seiz", 0.25);
        let rev = aggregate(&[b, a], "seiz", 0.25);
        assert_eq!(fwd.taes.tp, rev.taes.tp);
        assert_eq!(fwd.total_duration, rev.total_duration);
    }
}
