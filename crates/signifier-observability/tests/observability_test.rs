use std::time::Duration;

use signifier_core::models::{
    DegradationEvent, ResultSummary, RetrievalResponse, RunStatus, StageKind, StageOutcome,
    StagePerformance,
};
use signifier_observability::tracing_setup::spans::names;
use signifier_observability::tracing_setup::try_init_from_config;
use signifier_observability::{DegradationTracker, RecoveryStatus, RetrievalLog, RetrievalLogEntry};
use uuid::Uuid;

fn response(total_ms: f64, status: RunStatus) -> RetrievalResponse {
    RetrievalResponse {
        request_id: Uuid::new_v4(),
        status,
        results: Vec::new(),
        stages: vec![StagePerformance {
            stage: StageKind::IntentMatcher,
            elapsed_ms: total_ms / 2.0,
            candidate_count: 3,
            outcome: StageOutcome::Succeeded,
            over_budget: false,
            metadata: serde_json::Value::Null,
        }],
        total_elapsed_ms: total_ms,
        summary: ResultSummary::default(),
    }
}

// --- Retrieval log ---

#[test]
fn entry_from_response_copies_status_and_stage_latency() {
    let resp = response(40.0, RunStatus::Completed);
    let entry = RetrievalLogEntry::from_response("raise temperature", &resp);
    assert_eq!(entry.request_id, resp.request_id);
    assert_eq!(entry.status, "completed");
    assert_eq!(entry.latency, Duration::from_millis(40));
    assert_eq!(entry.stage_latency_ms(StageKind::IntentMatcher), Some(20.0));
    assert_eq!(entry.stage_latency_ms(StageKind::Ranker), None);
}

#[test]
fn log_is_bounded_and_drops_oldest() {
    let mut log = RetrievalLog::with_capacity(3);
    for i in 1..=5 {
        log.record(RetrievalLogEntry::from_response(
            format!("q{i}"),
            &response(i as f64, RunStatus::Completed),
        ));
    }
    assert_eq!(log.count(), 3);
    assert_eq!(log.entries()[0].query, "q3");
    assert_eq!(log.entries()[2].query, "q5");
}

#[test]
fn latency_statistics() {
    let mut log = RetrievalLog::with_capacity(10);
    assert_eq!(log.avg_latency(), Duration::ZERO);
    assert_eq!(log.latency_percentile(0.5), Duration::ZERO);

    for ms in [10.0, 20.0, 30.0, 40.0, 50.0] {
        log.record(RetrievalLogEntry::from_response("q", &response(ms, RunStatus::Completed)));
    }
    assert_eq!(log.avg_latency(), Duration::from_millis(30));
    assert_eq!(log.latency_percentile(0.0), Duration::from_millis(10));
    assert_eq!(log.latency_percentile(1.0), Duration::from_millis(50));
    assert_eq!(log.latency_percentile(0.5), Duration::from_millis(30));
    assert_eq!(log.avg_stage_latency_ms(StageKind::IntentMatcher), Some(15.0));
    assert_eq!(log.avg_stage_latency_ms(StageKind::ConstraintValidator), None);
}

#[test]
fn counts_by_status() {
    let mut log = RetrievalLog::new();
    log.record(RetrievalLogEntry::from_response("a", &response(1.0, RunStatus::Completed)));
    log.record(RetrievalLogEntry::from_response(
        "b",
        &response(
            1.0,
            RunStatus::Cancelled {
                skipped_stages: vec![StageKind::Ranker],
            },
        ),
    ));
    assert_eq!(log.count_with_status("completed"), 1);
    assert_eq!(log.count_with_status("cancelled"), 1);
    assert_eq!(log.count_with_status("failed"), 0);
}

// --- Degradation tracker ---

#[test]
fn record_and_recover() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::now("constraint_validator", "timeout", "signal omitted"));
    tracker.record(DegradationEvent::now("constraint_validator", "internal", "signal omitted"));
    tracker.record(DegradationEvent::now("intent_matcher", "timeout", "signal omitted"));

    assert!(tracker.is_degraded("constraint_validator"));
    assert_eq!(tracker.degraded_stages(), vec!["constraint_validator", "intent_matcher"]);
    assert_eq!(tracker.count_recent("constraint_validator", 60), 2);
    assert_eq!(tracker.count_all_recent(60), 3);
    assert!(tracker.degraded_duration("intent_matcher").is_some());

    let health = tracker.health("constraint_validator").unwrap();
    assert_eq!(health.consecutive_failures, 2);
    assert_eq!(health.last_failure.as_deref(), Some("internal"));

    assert!(tracker.mark_recovered("constraint_validator"));
    assert!(!tracker.is_degraded("constraint_validator"));
    assert!(tracker.degraded_duration("constraint_validator").is_none());
    assert_eq!(tracker.degraded_stages(), vec!["intent_matcher"]);

    let health = tracker.health("constraint_validator").unwrap();
    assert_eq!(health.status, RecoveryStatus::Recovered);
    assert!(health.recovered_at.is_some());
    assert_eq!(health.total_failures, 2);
    // History is a record of failures and survives recovery.
    assert_eq!(tracker.history().len(), 3);
}

#[test]
fn recovering_an_unknown_stage_is_a_no_op() {
    let mut tracker = DegradationTracker::new();
    assert!(!tracker.mark_recovered("ranker"));
    assert_eq!(tracker.history().len(), 0);
    assert!(tracker.health("ranker").is_none());
}

#[test]
fn history_is_bounded_by_capacity() {
    let mut tracker = DegradationTracker::with_capacity(16);
    for _ in 0..500 {
        tracker.record(DegradationEvent::now("intent_matcher", "internal", "signal omitted"));
    }
    assert_eq!(tracker.history().len(), 16);
    assert_eq!(tracker.health("intent_matcher").unwrap().total_failures, 500);
}

// --- Spans ---

#[test]
fn span_macros_expand() {
    let _retrieval = signifier_observability::retrieval_span!(Uuid::nil(), "open window");
    let _stage = signifier_observability::stage_span!(StageKind::Subsumption, 4usize);
    let _subsumption = signifier_observability::subsumption_span!(4usize);
    let _validation = signifier_observability::validation_span!(4usize, true);
    let _matching = signifier_observability::matching_span!("v1", 10usize);
    assert_eq!(names::RETRIEVAL, "signifier.retrieval");
    assert!(names::STAGE.starts_with("signifier."));
}

#[test]
fn try_init_is_idempotent() {
    let config = signifier_core::config::ObservabilityConfig::default();
    let _ = try_init_from_config(&config);
    assert!(!signifier_observability::try_init_tracing());
    assert!(!try_init_from_config(&config));
}
