//! The capability every functional stage implements, and the
//! request-scoped input it receives.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use signifier_core::errors::StageError;
use signifier_core::models::{Candidate, EnvironmentSnapshot, StageKind, StageResult};

use crate::cancellation::CancellationToken;

/// Immutable per-request data shared by every stage of one run.
#[derive(Debug)]
pub struct RunContext {
    pub query: String,
    pub environment: EnvironmentSnapshot,
    pub k: usize,
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl RunContext {
    /// `candidates` must already be deduplicated by id.
    pub fn new(
        query: impl Into<String>,
        environment: EnvironmentSnapshot,
        k: usize,
        candidates: Vec<Candidate>,
    ) -> Self {
        let index = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self {
            query: query.into(),
            environment,
            k,
            candidates,
            index,
        }
    }

    pub fn candidate(&self, id: &str) -> Option<&Candidate> {
        self.index.get(id).map(|&i| &self.candidates[i])
    }

    /// Resolve ids to candidates, skipping unknown ids. Preserves id order.
    pub fn resolve<'a>(&'a self, ids: &[String]) -> Vec<&'a Candidate> {
        ids.iter().filter_map(|id| self.candidate(id)).collect()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn specificity(&self, id: &str) -> usize {
        self.candidate(id).map_or(0, Candidate::specificity)
    }
}

/// Input to one stage invocation: the shared context plus the current
/// candidate set.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub context: Arc<RunContext>,
    pub candidate_ids: Vec<String>,
    /// Set once the orchestrator stops waiting for this stage (timeout or
    /// cancellation). Blocking work should check it between units of work.
    pub abort: CancellationToken,
}

impl StageInput {
    pub fn new(context: Arc<RunContext>, candidate_ids: Vec<String>) -> Self {
        Self {
            context,
            candidate_ids,
            abort: CancellationToken::new(),
        }
    }

    pub fn candidates(&self) -> Vec<&Candidate> {
        self.context.resolve(&self.candidate_ids)
    }
}

/// A functional pipeline stage.
///
/// Implementations are selected by configuration when a request is
/// resolved. A stage returns the ids it keeps plus the signals it emits;
/// the orchestrator merges the signals and narrows the set.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn run(&self, input: StageInput) -> Result<StageResult, StageError>;
}
