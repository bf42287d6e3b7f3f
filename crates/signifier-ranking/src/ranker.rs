use std::cmp::Ordering;

use tracing::debug;

use signifier_core::config::{defaults, RankingConfig};
use signifier_core::models::{FinalResultEntry, SignalLedger};

use crate::explain::explain_signal;
use crate::weights::RankingWeights;

/// Gate threshold and tie tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankerSettings {
    pub gate_pass_threshold: f64,
    pub tie_epsilon: f64,
}

impl Default for RankerSettings {
    fn default() -> Self {
        Self {
            gate_pass_threshold: defaults::DEFAULT_GATE_PASS_THRESHOLD,
            tie_epsilon: defaults::DEFAULT_TIE_EPSILON,
        }
    }
}

impl From<&RankingConfig> for RankerSettings {
    fn from(config: &RankingConfig) -> Self {
        Self {
            gate_pass_threshold: config.gate_pass_threshold,
            tie_epsilon: config.tie_epsilon,
        }
    }
}

/// A candidate eligible for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankCandidate<'a> {
    pub id: &'a str,
    /// Declared condition count.
    pub specificity: usize,
}

impl<'a> RankCandidate<'a> {
    pub fn new(id: &'a str, specificity: usize) -> Self {
        Self { id, specificity }
    }
}

/// Score and order every candidate with a non-empty ledger entry.
///
/// A falsy gate forces score 0. Otherwise the score is the weighted mean
/// of the non-gate signals present, booleans counting as 1/0; absent
/// signals are excluded from both sums, so the score does not change when
/// all weights are rescaled. Ties (within `tie_epsilon`) go to the more
/// specific candidate, then to the lexicographically smaller id.
/// Returned signals carry the weight that was applied to them.
pub fn rank(
    ledger: &SignalLedger,
    candidates: &[RankCandidate<'_>],
    weights: &RankingWeights,
    settings: &RankerSettings,
) -> Vec<FinalResultEntry> {
    let mut results: Vec<FinalResultEntry> = candidates
        .iter()
        .filter_map(|candidate| {
            let signals = ledger.get(candidate.id).filter(|s| !s.is_empty())?;

            let mut passed_gates = true;
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            let mut explanation = Vec::with_capacity(signals.len());
            let mut applied = Vec::with_capacity(signals.len());
            for signal in signals {
                let weight = weights.get(&signal.name).unwrap_or(signal.weight);
                explanation.push(explain_signal(signal, weight, settings.gate_pass_threshold));
                applied.push(signal.clone().with_weight(weight));
                if signal.is_gate {
                    passed_gates &= signal.value.is_truthy(settings.gate_pass_threshold);
                } else {
                    weighted_sum += signal.value.as_f64() * weight;
                    weight_total += weight;
                }
            }

            let final_score = if !passed_gates || weight_total <= 0.0 {
                0.0
            } else {
                weighted_sum / weight_total
            };

            Some(FinalResultEntry {
                candidate_id: candidate.id.to_string(),
                final_score,
                passed_gates,
                specificity: candidate.specificity,
                signals: applied,
                explanation,
            })
        })
        .collect();

    let epsilon = settings.tie_epsilon.max(f64::MIN_POSITIVE);
    results.sort_by(|a, b| order(a, b, epsilon));
    debug!(ranked = results.len(), "ranking complete");
    results
}

/// Total order: score bucket desc, specificity desc, id asc.
fn order(a: &FinalResultEntry, b: &FinalResultEntry, epsilon: f64) -> Ordering {
    let bucket = |score: f64| (score / epsilon).round();
    bucket(b.final_score)
        .total_cmp(&bucket(a.final_score))
        .then_with(|| b.specificity.cmp(&a.specificity))
        .then_with(|| a.candidate_id.cmp(&b.candidate_id))
}

/// Ranker bound to one weight set and settings.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: RankingWeights,
    settings: RankerSettings,
}

impl Ranker {
    pub fn new(weights: RankingWeights, settings: RankerSettings) -> Self {
        Self { weights, settings }
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    pub fn rank(&self, ledger: &SignalLedger, candidates: &[RankCandidate<'_>]) -> Vec<FinalResultEntry> {
        rank(ledger, candidates, &self.weights, &self.settings)
    }
}
