//! RetrievalOrchestrator: sequences the configured stages over one request.
//!
//! The run is a fold over `(candidates, ledger)`: each stage returns a
//! kept set plus a ledger delta, the delta is merged, and the kept set
//! becomes the next stage's input. Stages run strictly in sequence, each
//! raced against its timeout and the request's cancellation token.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use signifier_core::config::SignifierConfig;
use signifier_core::errors::{SignifierError, SignifierResult, StageError};
use signifier_core::models::{
    Candidate, DegradationEvent, FinalResultEntry, ResultSummary, RetrievalRequest,
    RetrievalResponse, RunStatus, SignalLedger, StageKind, StageOutcome, StagePerformance,
    StageResult,
};
use signifier_core::traits::ICandidateSource;
use signifier_matching::MatcherRegistry;
use signifier_observability::tracing_setup::events;
use signifier_observability::{DegradationTracker, RetrievalLog, RetrievalLogEntry};
use signifier_ranking::{RankCandidate, Ranker};
use signifier_subsumption::SubsumptionEngine;
use signifier_validation::StructuralValidator;

use crate::cancellation::CancellationToken;
use crate::resolve::ResolvedPipeline;
use crate::stage::{PipelineStage, RunContext, StageInput};
use crate::stages::{join_error, ConstraintStage, IntentMatchStage, SubsumptionStage};

const FALLBACK_SIGNAL_OMITTED: &str = "signal omitted";

/// Drives retrieval runs. Shared collaborators (matcher registry,
/// validator) are read-mostly; per-request state lives in `retrieve`.
/// The run log and degradation tracker are bounded process-level
/// diagnostics: runs write to them and never read them back.
pub struct RetrievalOrchestrator {
    config: SignifierConfig,
    source: Arc<dyn ICandidateSource>,
    matchers: Arc<MatcherRegistry>,
    validator: Arc<StructuralValidator>,
    retrieval_log: Mutex<RetrievalLog>,
    degradations: Mutex<DegradationTracker>,
}

impl RetrievalOrchestrator {
    /// Orchestrator with the built-in matchers and the structural validator.
    pub fn new(config: SignifierConfig, source: Arc<dyn ICandidateSource>) -> SignifierResult<Self> {
        let matchers = Arc::new(MatcherRegistry::with_defaults(&config.matching)?);
        Self::with_registry(config, source, matchers)
    }

    /// Orchestrator over a caller-supplied matcher registry. The config's
    /// default matcher version must be registered unless every request
    /// names its own.
    pub fn with_registry(
        config: SignifierConfig,
        source: Arc<dyn ICandidateSource>,
        matchers: Arc<MatcherRegistry>,
    ) -> SignifierResult<Self> {
        config.validate()?;
        let validator = Arc::new(StructuralValidator::new(config.validation));
        let retrieval_log = RetrievalLog::with_capacity(config.observability.retrieval_log_capacity);
        let degradations =
            DegradationTracker::with_capacity(config.observability.degradation_history_capacity);
        Ok(Self {
            config,
            source,
            matchers,
            validator,
            retrieval_log: Mutex::new(retrieval_log),
            degradations: Mutex::new(degradations),
        })
    }

    pub fn with_validator(mut self, validator: Arc<StructuralValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn config(&self) -> &SignifierConfig {
        &self.config
    }

    pub fn matchers(&self) -> &Arc<MatcherRegistry> {
        &self.matchers
    }

    /// Snapshot of the run log.
    pub fn retrieval_log(&self) -> RetrievalLog {
        lock(&self.retrieval_log).clone()
    }

    /// Snapshot of the degradation history.
    pub fn degradations(&self) -> DegradationTracker {
        lock(&self.degradations).clone()
    }

    /// Execute one retrieval run.
    ///
    /// Request and configuration problems, and candidate source failures,
    /// are returned as `Err` before any stage runs. Everything after that
    /// is reported in the response: stage failures degrade to missing
    /// signals unless the stage is mandatory, in which case the run ends
    /// with status `failed` and no results.
    pub async fn retrieve(
        &self,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> SignifierResult<RetrievalResponse> {
        let request_id = Uuid::new_v4();
        let span = signifier_observability::retrieval_span!(request_id, request.intent_query.as_str());
        self.run(request_id, request, cancel).instrument(span).await
    }

    async fn run(
        &self,
        request_id: Uuid,
        request: &RetrievalRequest,
        cancel: &CancellationToken,
    ) -> SignifierResult<RetrievalResponse> {
        let started = Instant::now();
        let resolved = ResolvedPipeline::resolve(&self.config, request)?;
        let stages = self.build_stages(&resolved)?;
        let candidates = self.load_candidates()?;

        info!(
            candidates = candidates.len(),
            stages = resolved.stages.len(),
            k = resolved.k,
            "retrieval started"
        );

        let mut current: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
        let context = Arc::new(RunContext::new(
            request.intent_query.clone(),
            request.environment.clone(),
            resolved.k,
            candidates,
        ));
        let ranker = Ranker::new(resolved.weights.clone(), resolved.ranker);

        let mut ledger = SignalLedger::new();
        let mut performance = Vec::with_capacity(resolved.stages.len());
        let mut ranked: Option<Vec<FinalResultEntry>> = None;
        let mut status = RunStatus::Completed;

        for (position, &kind) in resolved.stages.iter().enumerate() {
            if cancel.is_cancelled() {
                status = RunStatus::Cancelled {
                    skipped_stages: resolved.stages[position..].to_vec(),
                };
                break;
            }

            let stage_started = Instant::now();
            let budget = resolved.budgets_ms.for_stage(kind);

            if kind != StageKind::Ranker && current.is_empty() {
                events::stage_skipped(kind.name(), "empty candidate set");
                performance.push(StagePerformance {
                    stage: kind,
                    elapsed_ms: 0.0,
                    candidate_count: 0,
                    outcome: StageOutcome::Skipped {
                        reason: "empty candidate set".to_string(),
                    },
                    over_budget: false,
                    metadata: serde_json::Value::Null,
                });
                continue;
            }

            let timeout_ms = resolved.timeouts_ms.for_stage(kind);
            let abort = CancellationToken::new();
            let stage_span = signifier_observability::stage_span!(kind, current.len());
            let outcome = if kind == StageKind::Ranker {
                let eligible: Vec<(String, usize)> = current
                    .iter()
                    .filter(|id| !ledger.is_empty_for(id))
                    .map(|id| (id.clone(), context.specificity(id)))
                    .collect();
                let work = rank_blocking(ranker.clone(), ledger.clone(), eligible);
                bounded(kind, timeout_ms, cancel, &abort, work)
                    .instrument(stage_span)
                    .await
                    .map(StepOutput::Ranked)
            } else {
                let Some(stage) = stages.iter().find(|s| s.kind() == kind) else {
                    continue;
                };
                let input = StageInput {
                    context: Arc::clone(&context),
                    candidate_ids: current.clone(),
                    abort: abort.clone(),
                };
                bounded(kind, timeout_ms, cancel, &abort, stage.run(input))
                    .instrument(stage_span)
                    .await
                    .map(StepOutput::Stage)
            };
            let elapsed_ms = elapsed_ms(stage_started);

            match outcome {
                Ok(StepOutput::Ranked(entries)) => {
                    lock(&self.degradations).mark_recovered(kind.name());
                    events::stage_completed(kind.name(), elapsed_ms, entries.len(), elapsed_ms > budget);
                    performance.push(StagePerformance {
                        stage: kind,
                        elapsed_ms,
                        candidate_count: current.len(),
                        outcome: StageOutcome::Succeeded,
                        over_budget: elapsed_ms > budget,
                        metadata: serde_json::json!({ "ranked": entries.len() }),
                    });
                    ranked = Some(entries);
                }
                Ok(StepOutput::Stage(result)) => {
                    let (kept, delta, metadata) = result.into_parts();
                    debug!(stage = %kind, signals = delta.len(), kept = kept.len(), "merging stage output");
                    ledger = ledger.merged(delta);
                    current = narrow(&current, kept);
                    lock(&self.degradations).mark_recovered(kind.name());
                    events::stage_completed(kind.name(), elapsed_ms, current.len(), elapsed_ms > budget);
                    performance.push(StagePerformance {
                        stage: kind,
                        elapsed_ms,
                        candidate_count: current.len(),
                        outcome: StageOutcome::Succeeded,
                        over_budget: elapsed_ms > budget,
                        metadata,
                    });
                }
                Err(err) => {
                    let mandatory = resolved.is_mandatory(kind);
                    let message = err.to_string();
                    events::stage_failed(kind.name(), err.kind().as_str(), &message, mandatory);
                    performance.push(StagePerformance {
                        stage: kind,
                        elapsed_ms,
                        candidate_count: current.len(),
                        outcome: StageOutcome::Failed {
                            kind: err.kind(),
                            message: message.clone(),
                        },
                        over_budget: elapsed_ms > budget,
                        metadata: serde_json::Value::Null,
                    });

                    if let StageError::Cancelled { .. } = err {
                        status = RunStatus::Cancelled {
                            skipped_stages: resolved.stages[position + 1..].to_vec(),
                        };
                        break;
                    }
                    lock(&self.degradations).record(
                        DegradationEvent::now(kind.name(), message.clone(), FALLBACK_SIGNAL_OMITTED)
                            .for_request(request_id),
                    );
                    if mandatory {
                        status = RunStatus::Failed {
                            stage: kind,
                            reason: message,
                        };
                        break;
                    }
                }
            }
        }

        let results = match (&status, ranked) {
            (RunStatus::Completed, Some(entries)) => entries,
            _ => Vec::new(),
        };
        let total_elapsed_ms = elapsed_ms(started);
        let over_budget = total_elapsed_ms > resolved.budgets_ms.total;
        if over_budget {
            warn!(total_ms = total_elapsed_ms, budget_ms = resolved.budgets_ms.total, "retrieval over total latency budget");
        }

        let response = RetrievalResponse {
            request_id,
            summary: ResultSummary::from_results(&results),
            status,
            results,
            stages: performance,
            total_elapsed_ms,
        };
        events::run_completed(
            &request_id.to_string(),
            response.status.label(),
            response.results.len(),
            total_elapsed_ms,
            over_budget,
        );
        lock(&self.retrieval_log)
            .record(RetrievalLogEntry::from_response(&request.intent_query, &response));
        Ok(response)
    }

    /// Instantiate the functional stages this request uses.
    fn build_stages(&self, resolved: &ResolvedPipeline) -> SignifierResult<Vec<Box<dyn PipelineStage>>> {
        let mut stages: Vec<Box<dyn PipelineStage>> = Vec::new();
        for &kind in &resolved.stages {
            match kind {
                StageKind::IntentMatcher => {
                    let matcher = self.matchers.get(Some(resolved.matcher_version.as_str()))?;
                    stages.push(Box::new(IntentMatchStage::new(matcher)));
                }
                StageKind::Subsumption => stages.push(Box::new(SubsumptionStage::new(
                    SubsumptionEngine::new(resolved.subsumption),
                    resolved.narrow_on_subsumption,
                ))),
                StageKind::ConstraintValidator => {
                    stages.push(Box::new(ConstraintStage::new(Arc::clone(&self.validator))))
                }
                StageKind::Ranker => {}
            }
        }
        Ok(stages)
    }

    /// Load candidates, keeping the first occurrence of each id.
    fn load_candidates(&self) -> SignifierResult<Vec<Candidate>> {
        let loaded = self.source.load_candidates().map_err(|e| match e {
            err @ SignifierError::CandidateSource { .. } => err,
            other => SignifierError::CandidateSource {
                source_name: self.source.name().to_string(),
                reason: other.to_string(),
            },
        })?;

        let mut seen = HashSet::with_capacity(loaded.len());
        let mut candidates = Vec::with_capacity(loaded.len());
        for candidate in loaded {
            if !candidate.is_active() {
                debug!(candidate = %candidate.id, "skipping inactive candidate");
                continue;
            }
            if !seen.insert(candidate.id.clone()) {
                events::duplicate_candidate(&candidate.id, self.source.name());
                continue;
            }
            candidates.push(candidate);
        }
        Ok(candidates)
    }
}

/// Output of one step of the fold.
enum StepOutput {
    Stage(StageResult),
    Ranked(Vec<FinalResultEntry>),
}

/// Race a stage against its timeout and the cancellation token.
///
/// Losing the race sets `abort`. Blocking work cannot be preempted: it
/// keeps running on the blocking pool until it next checks `abort` or
/// returns, and its output is discarded.
async fn bounded<F, T>(
    stage: StageKind,
    timeout_ms: u64,
    cancel: &CancellationToken,
    abort: &CancellationToken,
    work: F,
) -> Result<T, StageError>
where
    F: Future<Output = Result<T, StageError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            abort.cancel();
            Err(StageError::Cancelled { stage })
        }
        res = tokio::time::timeout(Duration::from_millis(timeout_ms), work) => match res {
            Ok(inner) => inner,
            Err(_) => {
                abort.cancel();
                Err(StageError::Timeout { stage, timeout_ms })
            }
        },
    }
}

/// Rank on the blocking pool so the ranker's timeout can fire.
async fn rank_blocking(
    ranker: Ranker,
    ledger: SignalLedger,
    eligible: Vec<(String, usize)>,
) -> Result<Vec<FinalResultEntry>, StageError> {
    tokio::task::spawn_blocking(move || {
        let candidates: Vec<RankCandidate<'_>> = eligible
            .iter()
            .map(|(id, specificity)| RankCandidate::new(id, *specificity))
            .collect();
        ranker.rank(&ledger, &candidates)
    })
    .await
    .map_err(|e| join_error(StageKind::Ranker, e))
}

/// Keep the stage's ids that are in the current set, in stage order.
fn narrow(current: &[String], kept: Vec<String>) -> Vec<String> {
    let known: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(kept.len());
    kept.into_iter()
        .filter(|id| known.contains(id.as_str()) && seen.insert(id.clone()))
        .collect()
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_drops_unknown_and_duplicate_ids() {
        let current = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let kept = vec!["c".into(), "x".into(), "a".into(), "c".into()];
        assert_eq!(narrow(&current, kept), vec!["c".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn bounded_reports_timeout() {
        let cancel = CancellationToken::new();
        let abort = CancellationToken::new();
        let res: Result<(), StageError> =
            bounded(StageKind::ConstraintValidator, 5, &cancel, &abort, async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;
        assert!(matches!(res, Err(StageError::Timeout { timeout_ms: 5, .. })));
        assert!(abort.is_cancelled());
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn bounded_prefers_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let abort = CancellationToken::new();
        let res: Result<u8, StageError> =
            bounded(StageKind::IntentMatcher, 1000, &cancel, &abort, async { Ok(1) }).await;
        assert!(matches!(res, Err(StageError::Cancelled { .. })));
        assert!(abort.is_cancelled());
    }

    #[tokio::test]
    async fn bounded_leaves_abort_clear_on_success() {
        let cancel = CancellationToken::new();
        let abort = CancellationToken::new();
        let res: Result<u8, StageError> =
            bounded(StageKind::Ranker, 1000, &cancel, &abort, async { Ok(7) }).await;
        assert_eq!(res.unwrap(), 7);
        assert!(!abort.is_cancelled());
    }

    #[tokio::test]
    async fn ranking_runs_off_the_async_thread() {
        let ledger = SignalLedger::new().merged(
            vec![(
                "a".to_string(),
                signifier_core::models::Signal::numeric("intent_similarity", 0.5),
            )]
            .into_iter()
            .collect(),
        );
        let entries = rank_blocking(Ranker::default(), ledger, vec![("a".to_string(), 0)])
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!((entries[0].final_score - 0.5).abs() < 1e-9);
        assert_eq!(entries[0].signals[0].weight, 0.7);
    }
}
