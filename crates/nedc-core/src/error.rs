/// Error taxonomy for the scoring core (spec.md §7).
///
/// `InvalidInput` covers malformed events (`stop_time < start_time`,
/// negative time, an unnormalizable label) — the only kind a caller should
/// see on a well-formed corpus. `DurationMissing` is Epoch/IRA's event-mode
/// requirement for a positive `file_duration`. Both carry a numeric
/// `error_code` so an embedding service can match on it without string
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreReason {
    #[error("invalid event or annotation file: {0}")]
    InvalidInput(String),
    #[error("file_duration missing or non-positive for epoch-based scoring")]
    DurationMissing,
}

impl CoreReason {
    pub fn error_code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => 2001,
            Self::DurationMissing => 2002,
        }
    }
}

pub type CoreError = CoreReason;
pub type CoreResult<T> = Result<T, CoreError>;

pub(crate) fn invalid_input(msg: impl Into<String>) -> CoreError {
    CoreReason::InvalidInput(msg.into())
}

pub(crate) fn duration_missing() -> CoreError {
    CoreReason::DurationMissing
}
