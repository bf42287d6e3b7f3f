use std::collections::BTreeMap;

use signifier_core::models::{Signal, SignalLedger};
use signifier_ranking::{rank, RankCandidate, Ranker, RankerSettings, RankingWeights};

fn ledger_with(entries: &[(&str, Vec<Signal>)]) -> SignalLedger {
    let mut ledger = SignalLedger::new();
    for (id, signals) in entries {
        for s in signals {
            ledger.record(id, s.clone());
        }
    }
    ledger
}

fn default_rank(ledger: &SignalLedger, candidates: &[RankCandidate<'_>]) -> Vec<signifier_core::models::FinalResultEntry> {
    rank(ledger, candidates, &RankingWeights::default(), &RankerSettings::default())
}

#[test]
fn temperature_scenario_scores_0_881() {
    let ledger = ledger_with(&[(
        "heat",
        vec![
            Signal::numeric("intent_similarity", 0.83),
            Signal::boolean("subsumption_pass", true),
            Signal::boolean("constraint_conforms", true),
        ],
    )]);
    let results = default_rank(&ledger, &[RankCandidate::new("heat", 1)]);
    assert_eq!(results.len(), 1);
    assert!((results[0].final_score - 0.881).abs() < 1e-9);
    assert!(results[0].passed_gates);
    assert_eq!(
        results[0].explanation,
        vec![
            "intent_similarity: 0.8300 (weight: 0.7)",
            "subsumption_pass: PASS (weight: 0.1)",
            "constraint_conforms: PASS (weight: 0.2)",
        ]
    );
}

#[test]
fn ranked_signals_carry_applied_weight() {
    let ledger = ledger_with(&[(
        "heat",
        vec![
            Signal::numeric("intent_similarity", 0.83),
            Signal::boolean("constraint_conforms", true).as_gate(),
            Signal::numeric("vendor_affinity", 0.5).with_weight(0.05),
        ],
    )]);
    let results = default_rank(&ledger, &[RankCandidate::new("heat", 1)]);
    let weights: Vec<f64> = results[0].signals.iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![0.7, 0.2, 0.05]);
    assert_eq!(ledger.get("heat").unwrap()[0].weight, 0.0);
}

#[test]
fn falsy_gate_forces_zero_but_keeps_explanation() {
    let ledger = ledger_with(&[(
        "a",
        vec![
            Signal::numeric("intent_similarity", 0.99),
            Signal::boolean("constraint_conforms", false).as_gate(),
        ],
    )]);
    let results = default_rank(&ledger, &[RankCandidate::new("a", 0)]);
    assert_eq!(results[0].final_score, 0.0);
    assert!(!results[0].passed_gates);
    assert_eq!(results[0].explanation.len(), 2);
    assert_eq!(results[0].explanation[1], "constraint_conforms: FAIL (gate)");
}

#[test]
fn gate_contributes_no_weight() {
    let ledger = ledger_with(&[(
        "a",
        vec![
            Signal::numeric("intent_similarity", 0.6),
            Signal::boolean("constraint_conforms", true).as_gate(),
        ],
    )]);
    let results = default_rank(&ledger, &[RankCandidate::new("a", 0)]);
    assert!((results[0].final_score - 0.6).abs() < 1e-12);
}

#[test]
fn missing_signals_normalize_over_present_ones() {
    let ledger = ledger_with(&[(
        "a",
        vec![
            Signal::numeric("intent_similarity", 0.5),
            Signal::boolean("subsumption_pass", true),
        ],
    )]);
    let results = default_rank(&ledger, &[RankCandidate::new("a", 0)]);
    // (0.5*0.7 + 1*0.1) / 0.8
    assert!((results[0].final_score - 0.5625).abs() < 1e-12);
}

#[test]
fn zero_total_weight_scores_zero() {
    let overrides = BTreeMap::from([("intent_similarity".to_string(), 0.0)]);
    let weights = RankingWeights::default().with_overrides(&overrides).unwrap();
    let ledger = ledger_with(&[("a", vec![Signal::numeric("intent_similarity", 0.9)])]);
    let results = rank(&ledger, &[RankCandidate::new("a", 0)], &weights, &RankerSettings::default());
    assert_eq!(results[0].final_score, 0.0);
    assert!(results[0].passed_gates);
}

#[test]
fn specificity_breaks_ties() {
    let ledger = ledger_with(&[
        ("generic", vec![Signal::numeric("intent_similarity", 0.80)]),
        ("specific", vec![Signal::numeric("intent_similarity", 0.80)]),
    ]);
    let results = default_rank(
        &ledger,
        &[RankCandidate::new("generic", 1), RankCandidate::new("specific", 3)],
    );
    assert_eq!(results[0].candidate_id, "specific");
    assert_eq!(results[1].candidate_id, "generic");
}

#[test]
fn id_breaks_remaining_ties() {
    let ledger = ledger_with(&[
        ("b", vec![Signal::numeric("intent_similarity", 0.5)]),
        ("a", vec![Signal::numeric("intent_similarity", 0.5 + 1e-12)]),
    ]);
    let results = default_rank(&ledger, &[RankCandidate::new("b", 0), RankCandidate::new("a", 0)]);
    let ids: Vec<_> = results.iter().map(|r| r.candidate_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn candidates_without_signals_are_not_ranked() {
    let ledger = ledger_with(&[("a", vec![Signal::numeric("intent_similarity", 0.5)])]);
    let results = default_rank(&ledger, &[RankCandidate::new("a", 0), RankCandidate::new("ghost", 0)]);
    assert_eq!(results.len(), 1);
}

#[test]
fn numeric_gate_uses_threshold() {
    let ledger = ledger_with(&[(
        "a",
        vec![
            Signal::numeric("intent_similarity", 0.7),
            Signal::numeric("constraint_conforms", 0.4).as_gate(),
        ],
    )]);
    let strict = default_rank(&ledger, &[RankCandidate::new("a", 0)]);
    assert!(!strict[0].passed_gates);

    let lenient = Ranker::new(
        RankingWeights::default(),
        RankerSettings {
            gate_pass_threshold: 0.3,
            ..RankerSettings::default()
        },
    )
    .rank(&ledger, &[RankCandidate::new("a", 0)]);
    assert!(lenient[0].passed_gates);
    assert!((lenient[0].final_score - 0.7).abs() < 1e-12);
}
