//! Structured log events for pipeline operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a stage that completed.
pub fn stage_completed(stage: &str, elapsed_ms: f64, candidates: usize, over_budget: bool) {
    tracing::info!(
        event = "stage_completed",
        stage = %stage,
        elapsed_ms = elapsed_ms,
        candidates = candidates,
        over_budget = over_budget,
        "stage completed"
    );
}

/// Log a stage failure. The stage's signals are absent from the ledger.
pub fn stage_failed(stage: &str, kind: &str, reason: &str, mandatory: bool) {
    tracing::warn!(
        event = "stage_failed",
        stage = %stage,
        kind = %kind,
        reason = %reason,
        mandatory = mandatory,
        "stage failed"
    );
}

/// Log a stage that was not invoked.
pub fn stage_skipped(stage: &str, reason: &str) {
    tracing::info!(event = "stage_skipped", stage = %stage, reason = %reason, "stage skipped");
}

/// Log a finished run.
pub fn run_completed(request_id: &str, status: &str, results: usize, total_ms: f64, over_budget: bool) {
    tracing::info!(
        event = "run_completed",
        request_id = %request_id,
        status = %status,
        results = results,
        total_ms = total_ms,
        over_budget = over_budget,
        "retrieval run completed"
    );
}

/// Log a degradation event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a duplicate candidate id dropped from the initial set.
pub fn duplicate_candidate(candidate_id: &str, source: &str) {
    tracing::warn!(
        event = "duplicate_candidate",
        candidate_id = %candidate_id,
        source = %source,
        "duplicate candidate id, keeping first occurrence"
    );
}
