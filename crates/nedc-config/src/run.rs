use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ConfigResult, invalid};
use crate::logging::LoggingConfig;
use crate::params::{DpParams, EpochParams, IraParams, TaesParams};

/// Raw TOML structure; every section is optional, matching
/// [`BenchmarkRunConfig`]'s per-scorer defaults.
#[derive(Debug, Default, Deserialize)]
struct BenchmarkRunConfigRaw {
    #[serde(default)]
    taes: TaesParams,
    #[serde(default)]
    epoch: EpochParams,
    #[serde(default)]
    ira: IraParams,
    #[serde(default)]
    dp: DpParams,
    #[serde(default)]
    logging: LoggingConfig,
}

/// Resolved, validated `nedc.toml` configuration (spec.md §6).
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRunConfig {
    pub taes: TaesParams,
    pub epoch: EpochParams,
    pub ira: IraParams,
    pub dp: DpParams,
    pub logging: LoggingConfig,
}

impl Default for BenchmarkRunConfig {
    fn default() -> Self {
        Self {
            taes: TaesParams::default(),
            epoch: EpochParams::default(),
            ira: IraParams::default(),
            dp: DpParams::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BenchmarkRunConfig {
    /// Read and parse an `nedc.toml` file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| crate::error::ConfigReason::Read {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        content.parse()
    }
}

impl FromStr for BenchmarkRunConfig {
    type Err = crate::error::ConfigError;

    /// Parse a TOML string into a resolved, validated [`BenchmarkRunConfig`].
    fn from_str(toml_str: &str) -> ConfigResult<Self> {
        let raw: BenchmarkRunConfigRaw = toml::from_str(toml_str)?;
        let config = BenchmarkRunConfig {
            taes: raw.taes,
            epoch: raw.epoch,
            ira: raw.ira,
            dp: raw.dp,
            logging: raw.logging,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &BenchmarkRunConfig) -> ConfigResult<()> {
    if config.taes.target_label.trim().is_empty() {
        return Err(invalid("taes.target_label must not be empty"));
    }
    if config.epoch.epoch_duration <= 0.0 {
        return Err(invalid(format!(
            "epoch.epoch_duration must be > 0, got {}",
            config.epoch.epoch_duration
        )));
    }
    if config.ira.epoch_duration <= 0.0 {
        return Err(invalid(format!(
            "ira.epoch_duration must be > 0, got {}",
            config.ira.epoch_duration
        )));
    }
    for (name, penalty) in [
        ("dp.penalty_del", config.dp.penalty_del),
        ("dp.penalty_ins", config.dp.penalty_ins),
        ("dp.penalty_sub", config.dp.penalty_sub),
    ] {
        if penalty < 0.0 {
            return Err(invalid(format!("{name} must be >= 0, got {penalty}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogFormat;

    const FULL_TOML: &str = r#"
[taes]
target_label = "seiz"

[epoch]
epoch_duration = 0.25
null_class = "bckg"

[ira]
epoch_duration = 0.25
null_class = "bckg"

[dp]
penalty_del = 1.0
penalty_ins = 1.0
penalty_sub = 1.0

[logging]
level = "info"
format = "plain"
"#;

    #[test]
    fn load_full_toml() {
        let cfg: BenchmarkRunConfig = FULL_TOML.parse().unwrap();
        assert_eq!(cfg.taes.target_label, "seiz");
        assert_eq!(cfg.epoch.epoch_duration, 0.25);
        assert_eq!(cfg.dp.penalty_sub, 1.0);
        assert_eq!(cfg.logging.format, LogFormat::Plain);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg: BenchmarkRunConfig = "".parse().unwrap();
        assert_eq!(cfg, BenchmarkRunConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let cfg: BenchmarkRunConfig = "[dp]\npenalty_sub = 2.0\n".parse().unwrap();
        assert_eq!(cfg.dp.penalty_sub, 2.0);
        assert_eq!(cfg.dp.penalty_del, 1.0);
        assert_eq!(cfg.taes.target_label, "seiz");
    }

    #[test]
    fn reject_empty_target_label() {
        let toml = FULL_TOML.replace(r#"target_label = "seiz""#, r#"target_label = """#);
        assert!(toml.parse::<BenchmarkRunConfig>().is_err());
    }

    #[test]
    fn reject_zero_epoch_duration() {
        let toml = FULL_TOML.replace("epoch_duration = 0.25\nnull_class = \"bckg\"\n\n[ira]", "epoch_duration = 0.0\nnull_class = \"bckg\"\n\n[ira]");
        assert!(toml.parse::<BenchmarkRunConfig>().is_err());
    }

    #[test]
    fn reject_negative_penalty() {
        let toml = FULL_TOML.replace("penalty_del = 1.0", "penalty_del = -1.0");
        assert!(toml.parse::<BenchmarkRunConfig>().is_err());
    }

    #[test]
    fn reject_malformed_toml() {
        assert!("[taes\n".parse::<BenchmarkRunConfig>().is_err());
    }
}
