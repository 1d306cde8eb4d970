/// Error taxonomy for config loading and validation (spec.md §7's
/// one-enum-per-crate convention).
#[derive(Debug, thiserror::Error)]
pub enum ConfigReason {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigReason {
    pub fn error_code(&self) -> i32 {
        match self {
            Self::Read { .. } => 3001,
            Self::Parse(_) => 3002,
            Self::Invalid(_) => 3003,
        }
    }
}

pub type ConfigError = ConfigReason;
pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigReason::Invalid(msg.into())
}
