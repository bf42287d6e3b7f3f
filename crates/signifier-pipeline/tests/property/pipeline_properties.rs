#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use serde_json::json;

use common::*;
use signifier_core::models::{
    Candidate, ComparisonOperator, EnvironmentSnapshot, PipelineOverrides, RetrievalRequest,
    StructuredCondition,
};
use signifier_pipeline::CancellationToken;

fn candidate_strategy() -> impl Strategy<Value = (Option<i64>, Option<i64>)> {
    (proptest::option::of(0i64..40), proptest::option::of(0i64..40))
}

fn build(index: usize, limits: &(Option<i64>, Option<i64>)) -> Candidate {
    let (threshold, max) = limits;
    let mut candidate = Candidate::new(format!("c{index:02}"), "adjust the temperature");
    if let Some(t) = threshold {
        candidate = candidate.with_condition(
            StructuredCondition::new("sensor", "temperature").with(ComparisonOperator::LessThan, *t),
        );
    }
    if let Some(m) = max {
        candidate = candidate.with_shapes(json!({
            "shapes": [{ "target": "sensor", "properties": [{ "path": "temperature", "maxInclusive": m }] }]
        }));
    }
    candidate
}

fn run(candidates: Vec<Candidate>, similarity: f64, temperature: i64) -> signifier_core::models::RetrievalResponse {
    let orch = orchestrator(similarity, candidates);
    let req = RetrievalRequest::new(
        "raise the temperature",
        EnvironmentSnapshot::new().with_value("sensor", "temperature", temperature),
    )
    .with_pipeline(PipelineOverrides::default().with_k(100));
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(orch.retrieve(&req, &CancellationToken::new()))
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn non_narrowing_stages_keep_every_candidate(
        layouts in proptest::collection::vec(candidate_strategy(), 0..12),
        similarity in 0.0f64..=1.0,
        temperature in 0i64..40,
    ) {
        let candidates: Vec<Candidate> =
            layouts.iter().enumerate().map(|(i, l)| build(i, l)).collect();
        let resp = run(candidates.clone(), similarity, temperature);

        prop_assert!(resp.is_completed());
        prop_assert_eq!(resp.results.len(), candidates.len());
        prop_assert_eq!(resp.summary.total, candidates.len());
    }

    #[test]
    fn scores_stay_in_unit_interval_and_gates_veto(
        layouts in proptest::collection::vec(candidate_strategy(), 1..12),
        similarity in 0.0f64..=1.0,
        temperature in 0i64..40,
    ) {
        let candidates: Vec<Candidate> =
            layouts.iter().enumerate().map(|(i, l)| build(i, l)).collect();
        let resp = run(candidates, similarity, temperature);

        for entry in &resp.results {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&entry.final_score));
            if !entry.passed_gates {
                prop_assert_eq!(entry.final_score, 0.0);
            }
        }
        for pair in resp.results.windows(2) {
            prop_assert!(pair[0].final_score + 1e-9 >= pair[1].final_score);
        }
    }
}
