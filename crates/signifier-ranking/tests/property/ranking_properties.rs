use proptest::prelude::*;

use signifier_core::models::{Signal, SignalLedger};
use signifier_ranking::{rank, RankCandidate, RankerSettings, RankingWeights};

#[derive(Debug, Clone)]
struct Entry {
    similarity: Option<f64>,
    subsumption: Option<bool>,
    conforms: Option<(bool, bool)>,
    specificity: usize,
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (
        prop::option::of(0.0f64..=1.0),
        prop::option::of(any::<bool>()),
        prop::option::of((any::<bool>(), any::<bool>())),
        0usize..5,
    )
        .prop_map(|(similarity, subsumption, conforms, specificity)| Entry {
            similarity,
            subsumption,
            conforms,
            specificity,
        })
}

fn build(entries: &[Entry]) -> (SignalLedger, Vec<String>) {
    let mut ledger = SignalLedger::new();
    let ids: Vec<String> = (0..entries.len()).map(|i| format!("c{i:03}")).collect();
    for (id, e) in ids.iter().zip(entries) {
        if let Some(s) = e.similarity {
            ledger.record(id, Signal::numeric("intent_similarity", s));
        }
        if let Some(p) = e.subsumption {
            ledger.record(id, Signal::boolean("subsumption_pass", p));
        }
        if let Some((value, gate)) = e.conforms {
            let signal = Signal::boolean("constraint_conforms", value);
            ledger.record(id, if gate { signal.as_gate() } else { signal });
        }
    }
    (ledger, ids)
}

fn candidates<'a>(ids: &'a [String], entries: &[Entry]) -> Vec<RankCandidate<'a>> {
    ids.iter()
        .zip(entries)
        .map(|(id, e)| RankCandidate::new(id, e.specificity))
        .collect()
}

proptest! {
    #[test]
    fn falsy_gate_always_scores_zero(entries in prop::collection::vec(arb_entry(), 1..20)) {
        let (ledger, ids) = build(&entries);
        let results = rank(&ledger, &candidates(&ids, &entries), &RankingWeights::default(), &RankerSettings::default());
        for r in &results {
            let vetoed = r.signals.iter().any(|s| s.is_gate && !s.value.is_truthy(0.5));
            if vetoed {
                prop_assert_eq!(r.final_score, 0.0);
                prop_assert!(!r.passed_gates);
            } else {
                prop_assert!(r.passed_gates);
            }
        }
    }

    #[test]
    fn scores_invariant_under_weight_rescaling(
        entries in prop::collection::vec(arb_entry(), 1..20),
        factor in 0.01f64..100.0,
    ) {
        let (ledger, ids) = build(&entries);
        let cs = candidates(&ids, &entries);
        let base = rank(&ledger, &cs, &RankingWeights::default(), &RankerSettings::default());
        let scaled = rank(&ledger, &cs, &RankingWeights::default().scaled(factor), &RankerSettings::default());
        prop_assert_eq!(base.len(), scaled.len());
        let scaled_by_id: std::collections::HashMap<&str, f64> = scaled
            .iter()
            .map(|r| (r.candidate_id.as_str(), r.final_score))
            .collect();
        for a in &base {
            let b = scaled_by_id[a.candidate_id.as_str()];
            prop_assert!((a.final_score - b).abs() < 1e-9);
        }
    }

    #[test]
    fn scores_stay_in_unit_interval(entries in prop::collection::vec(arb_entry(), 1..20)) {
        let (ledger, ids) = build(&entries);
        let results = rank(&ledger, &candidates(&ids, &entries), &RankingWeights::default(), &RankerSettings::default());
        prop_assert!(results.iter().all(|r| (0.0..=1.0 + 1e-12).contains(&r.final_score)));
    }

    #[test]
    fn order_is_independent_of_input_order(entries in prop::collection::vec(arb_entry(), 1..20)) {
        let (ledger, ids) = build(&entries);
        let forward = candidates(&ids, &entries);
        let mut backward = forward.clone();
        backward.reverse();
        let a: Vec<String> = rank(&ledger, &forward, &RankingWeights::default(), &RankerSettings::default())
            .into_iter().map(|r| r.candidate_id).collect();
        let b: Vec<String> = rank(&ledger, &backward, &RankingWeights::default(), &RankerSettings::default())
            .into_iter().map(|r| r.candidate_id).collect();
        prop_assert_eq!(a, b);
    }
}
