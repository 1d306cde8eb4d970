use serde::{Deserialize, Serialize};

/// Logging configuration for `nedc-cli`. All fields default so the entire
/// `[logging]` section may be omitted from `nedc.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global `tracing-subscriber` env-filter directive, e.g. `"info"` or
    /// `"nedc_core=debug,info"`.
    pub level: String,
    /// Output format: `plain` (human-readable) or `json` (structured).
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Plain,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Plain,
    Json,
}
