//! Per-scorer parameter structs (spec.md §6). Every field has a default so
//! an entire `[section]` may be omitted from `nedc.toml`.

use serde::{Deserialize, Serialize};

/// Parameters for the TAES scorer (spec.md §4.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaesParams {
    /// The label TAES scores; all events of other labels are ignored.
    pub target_label: String,
}

impl Default for TaesParams {
    fn default() -> Self {
        Self {
            target_label: "seiz".to_string(),
        }
    }
}

/// Parameters shared by the Epoch scorer (spec.md §4.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpochParams {
    /// Fixed window width, in seconds, used for midpoint sampling.
    pub epoch_duration: f64,
    /// Label used to gap-fill uncovered spans before sampling.
    pub null_class: String,
}

impl Default for EpochParams {
    fn default() -> Self {
        Self {
            epoch_duration: 0.25,
            null_class: "bckg".to_string(),
        }
    }
}

/// Parameters for the IRA scorer's event mode (spec.md §4.5). Shares the
/// Epoch scorer's sampling grid but skips joint compression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IraParams {
    pub epoch_duration: f64,
    pub null_class: String,
}

impl Default for IraParams {
    fn default() -> Self {
        Self {
            epoch_duration: 0.25,
            null_class: "bckg".to_string(),
        }
    }
}

/// Edit-distance penalties for the DP alignment scorer (spec.md §4.3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DpParams {
    pub penalty_del: f64,
    pub penalty_ins: f64,
    pub penalty_sub: f64,
}

impl Default for DpParams {
    fn default() -> Self {
        Self {
            penalty_del: 1.0,
            penalty_ins: 1.0,
            penalty_sub: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        assert_eq!(TaesParams::default().target_label, "seiz");
        assert_eq!(EpochParams::default().epoch_duration, 0.25);
        assert_eq!(EpochParams::default().null_class, "bckg");
        assert_eq!(IraParams::default().epoch_duration, 0.25);
        assert_eq!(DpParams::default().penalty_del, 1.0);
        assert_eq!(DpParams::default().penalty_ins, 1.0);
        assert_eq!(DpParams::default().penalty_sub, 1.0);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let p: TaesParams = toml::from_str("").unwrap();
        assert_eq!(p.target_label, "seiz");

        let e: EpochParams = toml::from_str("epoch_duration = 1.0").unwrap();
        assert_eq!(e.epoch_duration, 1.0);
        assert_eq!(e.null_class, "bckg");
    }
}
