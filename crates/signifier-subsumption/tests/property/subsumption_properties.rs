use proptest::prelude::*;

use signifier_core::config::MissingValuePolicy;
use signifier_core::models::{EnvironmentSnapshot, ScalarValue, StructuredCondition};
use signifier_subsumption::{evaluate, ViolationKind};

const OPERATORS: [&str; 6] = [
    "greaterThan",
    "lessThan",
    "greaterEqual",
    "lessEqual",
    "equals",
    "notEquals",
];

fn arb_scalar() -> impl Strategy<Value = ScalarValue> {
    prop_oneof![
        (-100.0f64..100.0).prop_map(ScalarValue::Number),
        any::<bool>().prop_map(ScalarValue::Boolean),
        "[a-z0-9]{0,4}".prop_map(ScalarValue::Text),
    ]
}

fn arb_condition() -> impl Strategy<Value = StructuredCondition> {
    (
        prop::sample::select(vec!["s1", "s2"]),
        prop::sample::select(vec!["p1", "p2", "p3"]),
        prop::collection::vec((prop::sample::select(OPERATORS.to_vec()), arb_scalar()), 1..3),
    )
        .prop_map(|(artifact, property, pairs)| {
            pairs
                .into_iter()
                .fold(StructuredCondition::new(artifact, property), |c, (op, v)| c.with(op, v))
        })
}

fn arb_snapshot() -> impl Strategy<Value = EnvironmentSnapshot> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["s1", "s2"]),
            prop::sample::select(vec!["p1", "p2"]),
            arb_scalar(),
        ),
        0..5,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .fold(EnvironmentSnapshot::new(), |s, (a, p, v)| s.with_value(a, p, v))
    })
}

fn arb_policy() -> impl Strategy<Value = MissingValuePolicy> {
    prop_oneof![
        Just(MissingValuePolicy::Fail),
        Just(MissingValuePolicy::Ignore),
        Just(MissingValuePolicy::Pass),
    ]
}

proptest! {
    #[test]
    fn evaluate_is_idempotent(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        snapshot in arb_snapshot(),
        policy in arb_policy(),
        coercion in any::<bool>(),
    ) {
        let first = evaluate(&conditions, &snapshot, policy, coercion);
        let second = evaluate(&conditions, &snapshot, policy, coercion);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pass_policy_never_reports_missing(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        snapshot in arb_snapshot(),
        coercion in any::<bool>(),
    ) {
        let outcome = evaluate(&conditions, &snapshot, MissingValuePolicy::Pass, coercion);
        prop_assert!(outcome.violations.iter().all(|v| v.kind != ViolationKind::MissingProperty));
    }

    #[test]
    fn fail_policy_reports_every_missing(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        snapshot in arb_snapshot(),
        coercion in any::<bool>(),
    ) {
        let outcome = evaluate(&conditions, &snapshot, MissingValuePolicy::Fail, coercion);
        let missing_violations = outcome
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::MissingProperty)
            .count();
        prop_assert_eq!(missing_violations, outcome.missing.len());
        prop_assert_eq!(outcome.checked, conditions.len());
    }

    #[test]
    fn ignore_policy_excludes_missing_from_checked(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        snapshot in arb_snapshot(),
        coercion in any::<bool>(),
    ) {
        let outcome = evaluate(&conditions, &snapshot, MissingValuePolicy::Ignore, coercion);
        prop_assert_eq!(outcome.checked + outcome.missing.len(), conditions.len());
    }

    #[test]
    fn pass_iff_no_violations(
        conditions in prop::collection::vec(arb_condition(), 0..5),
        snapshot in arb_snapshot(),
        policy in arb_policy(),
        coercion in any::<bool>(),
    ) {
        let outcome = evaluate(&conditions, &snapshot, policy, coercion);
        prop_assert_eq!(outcome.pass, outcome.violations.is_empty());
    }
}
