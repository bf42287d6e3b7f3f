use async_trait::async_trait;
use serde_json::{json, Map};
use tracing::warn;

use signifier_core::constants::SIGNAL_SUBSUMPTION_PASS;
use signifier_core::errors::StageError;
use signifier_core::models::{Signal, StageKind, StageResult};
use signifier_subsumption::SubsumptionEngine;

use crate::stage::{PipelineStage, StageInput};

/// Runs the SSF over the current set and emits `subsumption_pass`.
///
/// Malformed candidates always leave the set. Candidates that merely fail
/// leave it only when the stage is narrowing.
pub struct SubsumptionStage {
    engine: SubsumptionEngine,
    narrowing: bool,
}

impl SubsumptionStage {
    pub fn new(engine: SubsumptionEngine, narrowing: bool) -> Self {
        Self { engine, narrowing }
    }
}

#[async_trait]
impl PipelineStage for SubsumptionStage {
    fn kind(&self) -> StageKind {
        StageKind::Subsumption
    }

    async fn run(&self, input: StageInput) -> Result<StageResult, StageError> {
        let candidates = input.candidates();
        let span = signifier_observability::subsumption_span!(candidates.len());

        span.in_scope(|| -> Result<StageResult, StageError> {
            let mut kept = Vec::with_capacity(candidates.len());
            let mut signals = Vec::with_capacity(candidates.len());
            let mut details = Map::new();
            let mut malformed = Vec::new();

            for candidate in &candidates {
                let outcome = self
                    .engine
                    .evaluate_candidate(candidate, &input.context.environment);
                signals.push((
                    candidate.id.clone(),
                    Signal::boolean(SIGNAL_SUBSUMPTION_PASS, outcome.pass),
                ));
                if outcome.malformed {
                    warn!(candidate = %candidate.id, "malformed declared conditions, candidate excluded");
                    malformed.push(candidate.id.clone());
                } else if outcome.pass || !self.narrowing {
                    kept.push(candidate.id.clone());
                }
                let detail = serde_json::to_value(&outcome)
                    .map_err(|e| StageError::internal(StageKind::Subsumption, e))?;
                details.insert(candidate.id.clone(), detail);
            }

            Ok(StageResult {
                kept,
                signals,
                metadata: json!({
                    "narrowing": self.narrowing,
                    "malformed": malformed,
                    "candidates": details,
                }),
            })
        })
    }
}
