//! Error handling for the signifier pipeline.
//! One error enum per subsystem, `thiserror` only, aggregated by [`SignifierError`].

pub mod config_error;
pub mod matching_error;
pub mod stage_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use matching_error::MatchingError;
pub use stage_error::{StageError, StageFailureKind};
pub use validation_error::ValidationError;

/// Top-level error type. Subsystem errors convert into it via `From`.
#[derive(Debug, thiserror::Error)]
pub enum SignifierError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("stage error: {0}")]
    Stage(#[from] StageError),

    #[error("matching error: {0}")]
    Matching(#[from] MatchingError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("candidate source '{source_name}' failed: {reason}")]
    CandidateSource { source_name: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type SignifierResult<T> = Result<T, SignifierError>;

impl SignifierError {
    /// Whether this error was raised while validating the request or its
    /// configuration, i.e. before any stage executed.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidRequest { .. })
    }
}
