use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use signifier_core::constants::SIGNAL_INTENT_SIMILARITY;
use signifier_core::errors::StageError;
use signifier_core::models::{Signal, StageKind, StageResult};
use signifier_core::traits::IIntentMatcher;

use crate::stage::{PipelineStage, StageInput};

/// Scores candidates with one registered intent matcher.
///
/// Keeps only what the matcher returns (top-`k`, positive similarity for
/// the lexical matcher), in matcher order.
pub struct IntentMatchStage {
    matcher: Arc<dyn IIntentMatcher>,
}

impl IntentMatchStage {
    pub fn new(matcher: Arc<dyn IIntentMatcher>) -> Self {
        Self { matcher }
    }

    pub fn version(&self) -> &str {
        self.matcher.version()
    }
}

#[async_trait]
impl PipelineStage for IntentMatchStage {
    fn kind(&self) -> StageKind {
        StageKind::IntentMatcher
    }

    async fn run(&self, input: StageInput) -> Result<StageResult, StageError> {
        let matcher = Arc::clone(&self.matcher);
        let k = input.context.k;
        let span = signifier_observability::matching_span!(matcher.version(), k);

        // A matcher call is one unit of work; once started it runs to completion.
        let scores = tokio::task::spawn_blocking(move || {
            span.in_scope(|| {
                if input.abort.is_cancelled() {
                    return Err(StageError::Cancelled { stage: StageKind::IntentMatcher });
                }
                let candidates = input.candidates();
                matcher
                    .match_intent(&input.context.query, &candidates, k)
                    .map_err(|e| StageError::internal(StageKind::IntentMatcher, e))
            })
        })
        .await
        .map_err(|e| super::join_error(StageKind::IntentMatcher, e))??;

        let kept = scores.iter().map(|s| s.candidate_id.clone()).collect();
        let mut result = StageResult::new(kept);
        for score in &scores {
            result = result.with_signal(
                score.candidate_id.clone(),
                Signal::numeric(SIGNAL_INTENT_SIMILARITY, score.similarity.clamp(0.0, 1.0)),
            );
        }
        Ok(result.with_metadata(json!({
            "matcher": self.matcher.version(),
            "k": k,
            "returned": scores.len(),
        })))
    }
}
