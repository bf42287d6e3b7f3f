//! Adapters wrapping each collaborator in the [`PipelineStage`](crate::PipelineStage) contract.

mod constraint;
mod intent;
mod subsumption;

pub use constraint::ConstraintStage;
pub use intent::IntentMatchStage;
pub use subsumption::SubsumptionStage;

use signifier_core::errors::StageError;
use signifier_core::models::StageKind;

pub(crate) fn join_error(stage: StageKind, err: tokio::task::JoinError) -> StageError {
    StageError::internal(stage, format!("stage task aborted: {err}"))
}
