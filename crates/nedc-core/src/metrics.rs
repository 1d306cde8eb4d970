//! Derived rate metrics shared by every scorer (spec.md §4.6, supplemented
//! by a `from_counts` convenience per SPEC_FULL.md §10).

use serde::{Deserialize, Serialize};

/// Sensitivity (recall): `tp / (tp + fn)`, `0.0` if the denominator is `0.0`.
pub fn sensitivity(tp: f64, fn_: f64) -> f64 {
    let denom = tp + fn_;
    if denom <= 0.0 { 0.0 } else { tp / denom }
}

/// Precision: `tp / (tp + fp)`, `0.0` if the denominator is `0.0`.
pub fn precision(tp: f64, fp: f64) -> f64 {
    let denom = tp + fp;
    if denom <= 0.0 { 0.0 } else { tp / denom }
}

/// Harmonic mean of sensitivity and precision, `0.0` if both are `0.0`.
pub fn f1(sensitivity: f64, precision: f64) -> f64 {
    let denom = sensitivity + precision;
    if denom <= 0.0 {
        0.0
    } else {
        2.0 * sensitivity * precision / denom
    }
}

/// False alarms per 24 hours of recording, `0.0` if `total_duration_s <= 0.0`.
///
/// `epoch_duration`, when given, scales `fp` before the division — the
/// epoch scorer's false-positive count is a sample count, not a seconds
/// count, so it must be weighted by the window width it was sampled at
/// (spec.md §4.4, §4.6) before it's comparable to a duration in seconds.
pub fn fa_per_24h(fp: f64, total_duration_s: f64, epoch_duration: Option<f64>) -> f64 {
    if total_duration_s <= 0.0 {
        0.0
    } else {
        fp * epoch_duration.unwrap_or(1.0) * 86_400.0 / total_duration_s
    }
}

/// The four headline rates derived from one scorer's raw counts, bundled so
/// callers don't re-derive them ad hoc at every call site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub sensitivity: f64,
    pub precision: f64,
    pub f1: f64,
    pub fa_per_24h: f64,
}

impl Metrics {
    /// Build a [`Metrics`] from raw tp/fp/fn counts and the file duration
    /// they were accumulated over. Pass `epoch_duration` for epoch-based
    /// scorers so FA/24h scales by the sampling window width (spec.md §4.4).
    pub fn from_counts(tp: f64, fp: f64, fn_: f64, total_duration_s: f64, epoch_duration: Option<f64>) -> Self {
        let sens = sensitivity(tp, fn_);
        let prec = precision(tp, fp);
        Self {
            sensitivity: sens,
            precision: prec,
            f1: f1(sens, prec),
            fa_per_24h: fa_per_24h(fp, total_duration_s, epoch_duration),
        }
    }
}
