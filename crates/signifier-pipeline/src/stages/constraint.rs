use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map};

use signifier_core::constants::SIGNAL_CONSTRAINT_CONFORMS;
use signifier_core::errors::StageError;
use signifier_core::models::{ConformanceReport, Signal, StageKind, StageResult};
use signifier_core::traits::IConstraintValidator;
use signifier_validation::StructuralValidator;

use crate::stage::{PipelineStage, StageInput};

/// Validates declared shapes against the snapshot.
///
/// Candidates with shapes get a gating `constraint_conforms`; candidates
/// without shapes get a non-gating `true`. Never narrows. One unparseable
/// shapes document fails the whole stage.
pub struct ConstraintStage {
    validator: Arc<StructuralValidator>,
}

impl ConstraintStage {
    pub fn new(validator: Arc<StructuralValidator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl PipelineStage for ConstraintStage {
    fn kind(&self) -> StageKind {
        StageKind::ConstraintValidator
    }

    async fn run(&self, input: StageInput) -> Result<StageResult, StageError> {
        let validator = Arc::clone(&self.validator);
        let span = signifier_observability::validation_span!(
            input.candidate_ids.len(),
            validator.config().parallel
        );

        tokio::task::spawn_blocking(move || span.in_scope(|| validate(&validator, &input)))
            .await
            .map_err(|e| super::join_error(StageKind::ConstraintValidator, e))?
    }
}

fn validate(validator: &StructuralValidator, input: &StageInput) -> Result<StageResult, StageError> {
    let stage = StageKind::ConstraintValidator;
    let candidates = input.candidates();

    let shaped: Vec<(&str, &serde_json::Value)> = candidates
        .iter()
        .filter(|c| c.has_shapes())
        .filter_map(|c| c.constraint_shapes.as_ref().map(|s| (c.id.as_str(), s)))
        .collect();

    let mut reports: HashMap<&str, ConformanceReport> = HashMap::with_capacity(shaped.len());
    let batch = validator.validate_batch_until(&shaped, &input.context.environment, || {
        input.abort.is_cancelled()
    });
    if input.abort.is_cancelled() {
        return Err(StageError::Cancelled { stage });
    }
    for (id, report) in batch {
        let report = report
            .map_err(|e| StageError::internal(stage, format!("candidate '{id}': {e}")))?;
        reports.insert(id, report);
    }

    let mut result = StageResult::new(candidates.iter().map(|c| c.id.clone()).collect());
    let mut details = Map::new();
    for candidate in &candidates {
        let signal = match reports.remove(candidate.id.as_str()) {
            Some(report) => {
                let conforms = report.conforms;
                let detail =
                    serde_json::to_value(&report).map_err(|e| StageError::internal(stage, e))?;
                details.insert(candidate.id.clone(), detail);
                Signal::boolean(SIGNAL_CONSTRAINT_CONFORMS, conforms).as_gate()
            }
            None => Signal::boolean(SIGNAL_CONSTRAINT_CONFORMS, true),
        };
        result = result.with_signal(candidate.id.clone(), signal);
    }

    Ok(result.with_metadata(json!({
        "validator": validator.name(),
        "validated": shaped.len(),
        "reports": details,
    })))
}
