use serde::{Deserialize, Serialize};

use crate::models::StageKind;

/// Runtime failures reported by a single pipeline stage.
///
/// Non-mandatory stage failures degrade to missing signals; mandatory
/// stage failures fail the run.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("stage {stage} exceeded its {timeout_ms}ms timeout")]
    Timeout { stage: StageKind, timeout_ms: u64 },

    #[error("stage {stage} failed: {reason}")]
    Internal { stage: StageKind, reason: String },

    #[error("stage {stage} was cancelled")]
    Cancelled { stage: StageKind },
}

/// Coarse classification of a stage failure for performance records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageFailureKind {
    Timeout,
    Internal,
    Cancelled,
}

impl StageFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Internal => "internal",
            Self::Cancelled => "cancelled",
        }
    }
}

impl StageError {
    pub fn stage(&self) -> StageKind {
        match self {
            Self::Timeout { stage, .. } | Self::Internal { stage, .. } | Self::Cancelled { stage } => {
                *stage
            }
        }
    }

    pub fn kind(&self) -> StageFailureKind {
        match self {
            Self::Timeout { .. } => StageFailureKind::Timeout,
            Self::Internal { .. } => StageFailureKind::Internal,
            Self::Cancelled { .. } => StageFailureKind::Cancelled,
        }
    }

    /// Build an internal error from any displayable cause.
    pub fn internal(stage: StageKind, reason: impl std::fmt::Display) -> Self {
        Self::Internal {
            stage,
            reason: reason.to_string(),
        }
    }
}
