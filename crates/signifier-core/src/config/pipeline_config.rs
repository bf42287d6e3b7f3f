use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::StageKind;

/// Stage sequencing, timeouts, and latency budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Ordered stage identifiers (canonical names or aliases).
    pub stages: Vec<String>,
    /// Stages whose failure fails the whole run.
    pub mandatory_stages: Vec<String>,
    /// Drop candidates that fail the subsumption filter.
    pub narrow_on_subsumption: bool,
    /// Reject pipelines where the ranker precedes a stage whose signal it weights.
    pub strict_ordering: bool,
    pub timeouts_ms: StageTimeouts,
    pub latency_budgets_ms: LatencyBudgets,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: defaults::DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
            mandatory_stages: Vec::new(),
            narrow_on_subsumption: defaults::DEFAULT_NARROW_ON_SUBSUMPTION,
            strict_ordering: defaults::DEFAULT_STRICT_ORDERING,
            timeouts_ms: StageTimeouts::default(),
            latency_budgets_ms: LatencyBudgets::default(),
        }
    }
}

/// Hard per-stage timeouts (ms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTimeouts {
    pub intent_matcher: u64,
    pub subsumption: u64,
    pub constraint_validator: u64,
    pub ranker: u64,
}

impl StageTimeouts {
    pub fn for_stage(&self, stage: StageKind) -> u64 {
        match stage {
            StageKind::IntentMatcher => self.intent_matcher,
            StageKind::Subsumption => self.subsumption,
            StageKind::ConstraintValidator => self.constraint_validator,
            StageKind::Ranker => self.ranker,
        }
    }
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            intent_matcher: defaults::DEFAULT_INTENT_TIMEOUT_MS,
            subsumption: defaults::DEFAULT_SUBSUMPTION_TIMEOUT_MS,
            constraint_validator: defaults::DEFAULT_VALIDATOR_TIMEOUT_MS,
            ranker: defaults::DEFAULT_RANKER_TIMEOUT_MS,
        }
    }
}

/// Soft latency targets (ms). Exceeding one is reported, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyBudgets {
    pub total: f64,
    pub intent_matcher: f64,
    pub subsumption: f64,
    pub constraint_validator: f64,
    pub ranker: f64,
}

impl LatencyBudgets {
    pub fn for_stage(&self, stage: StageKind) -> f64 {
        match stage {
            StageKind::IntentMatcher => self.intent_matcher,
            StageKind::Subsumption => self.subsumption,
            StageKind::ConstraintValidator => self.constraint_validator,
            StageKind::Ranker => self.ranker,
        }
    }
}

impl Default for LatencyBudgets {
    fn default() -> Self {
        Self {
            total: defaults::DEFAULT_TOTAL_BUDGET_MS,
            intent_matcher: defaults::DEFAULT_INTENT_BUDGET_MS,
            subsumption: defaults::DEFAULT_SUBSUMPTION_BUDGET_MS,
            constraint_validator: defaults::DEFAULT_VALIDATOR_BUDGET_MS,
            ranker: defaults::DEFAULT_RANKER_BUDGET_MS,
        }
    }
}
