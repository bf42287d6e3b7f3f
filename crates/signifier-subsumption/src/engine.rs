use serde::{Deserialize, Serialize};
use tracing::debug;

use signifier_core::config::{MissingValuePolicy, SubsumptionConfig};
use signifier_core::constants::FLAT_KEY_SEPARATOR;
use signifier_core::models::{Candidate, EnvironmentSnapshot, StructuredCondition};

use crate::compare::{compare, Comparison};
use crate::violation::Violation;

/// Result of evaluating one candidate's declared conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsumptionOutcome {
    pub pass: bool,
    pub violations: Vec<Violation>,
    /// Conditions actually evaluated (ignored-missing ones excluded).
    pub checked: usize,
    /// `artifact::property` keys absent from the snapshot.
    pub missing: Vec<String>,
    /// At least one condition could not be parsed.
    pub malformed: bool,
}

/// Evaluate declared conditions against a snapshot.
///
/// Pairs within one condition are ANDed; `pass` is the AND of every
/// non-ignored condition. A candidate with no conditions passes vacuously.
pub fn evaluate(
    conditions: &[StructuredCondition],
    snapshot: &EnvironmentSnapshot,
    policy: MissingValuePolicy,
    coercion: bool,
) -> SubsumptionOutcome {
    let mut outcome = SubsumptionOutcome {
        pass: true,
        violations: Vec::new(),
        checked: 0,
        missing: Vec::new(),
        malformed: false,
    };

    for condition in conditions {
        if let Some(reason) = unparseable_reason(condition) {
            outcome.malformed = true;
            outcome.pass = false;
            outcome
                .violations
                .push(Violation::unparseable(&condition.artifact, &condition.property, &reason));
            continue;
        }

        let Some(actual) = snapshot.get(&condition.artifact, &condition.property) else {
            outcome.missing.push(format!(
                "{}{FLAT_KEY_SEPARATOR}{}",
                condition.artifact, condition.property
            ));
            match policy {
                MissingValuePolicy::Fail => {
                    outcome.checked += 1;
                    outcome.pass = false;
                    outcome
                        .violations
                        .push(Violation::missing(&condition.artifact, &condition.property));
                }
                MissingValuePolicy::Pass => outcome.checked += 1,
                MissingValuePolicy::Ignore => {}
            }
            continue;
        };

        outcome.checked += 1;
        for pair in &condition.value_conditions {
            let violation = match compare(&pair.operator, actual, &pair.value, coercion) {
                Comparison::Holds => continue,
                Comparison::Fails => Violation::comparison(
                    &condition.artifact,
                    &condition.property,
                    &pair.operator,
                    &pair.value,
                    actual,
                ),
                Comparison::Incomparable => Violation::coercion(
                    &condition.artifact,
                    &condition.property,
                    &pair.operator,
                    &pair.value,
                    actual,
                ),
            };
            outcome.pass = false;
            outcome.violations.push(violation);
        }
    }

    outcome
}

fn unparseable_reason(condition: &StructuredCondition) -> Option<String> {
    if condition.artifact.trim().is_empty() {
        return Some("artifact reference is empty".to_string());
    }
    if condition.property.trim().is_empty() {
        return Some("property reference is empty".to_string());
    }
    if condition.value_conditions.is_empty() {
        return Some("no value conditions declared".to_string());
    }
    condition
        .value_conditions
        .iter()
        .find(|pair| !pair.operator.is_recognized())
        .map(|pair| format!("unknown operator '{}'", pair.operator))
}

/// SSF bound to one policy/coercion setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsumptionEngine {
    config: SubsumptionConfig,
}

impl SubsumptionEngine {
    pub fn new(config: SubsumptionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SubsumptionConfig {
        &self.config
    }

    pub fn evaluate(
        &self,
        conditions: &[StructuredCondition],
        snapshot: &EnvironmentSnapshot,
    ) -> SubsumptionOutcome {
        evaluate(
            conditions,
            snapshot,
            self.config.missing_value_policy,
            self.config.type_coercion,
        )
    }

    pub fn evaluate_candidate(
        &self,
        candidate: &Candidate,
        snapshot: &EnvironmentSnapshot,
    ) -> SubsumptionOutcome {
        let outcome = self.evaluate(&candidate.declared_conditions, snapshot);
        debug!(
            candidate = %candidate.id,
            pass = outcome.pass,
            checked = outcome.checked,
            violations = outcome.violations.len(),
            "subsumption evaluated"
        );
        outcome
    }
}
