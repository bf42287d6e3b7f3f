use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{LedgerDelta, Signal};
use crate::constants::{
    SIGNAL_CONSTRAINT_CONFORMS, SIGNAL_INTENT_SIMILARITY, SIGNAL_SUBSUMPTION_PASS,
};
use crate::errors::{ConfigError, StageFailureKind};

/// Identifier of a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StageKind {
    IntentMatcher,
    Subsumption,
    ConstraintValidator,
    Ranker,
}

impl StageKind {
    /// Intent Matcher → SSF → Constraint Validator → Ranker.
    pub const DEFAULT_ORDER: [StageKind; 4] = [
        StageKind::IntentMatcher,
        StageKind::Subsumption,
        StageKind::ConstraintValidator,
        StageKind::Ranker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::IntentMatcher => "intent_matcher",
            Self::Subsumption => "subsumption",
            Self::ConstraintValidator => "constraint_validator",
            Self::Ranker => "ranker",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Self::IntentMatcher => "IM",
            Self::Subsumption => "SSE",
            Self::ConstraintValidator => "SV",
            Self::Ranker => "RP",
        }
    }

    /// Functional stages produce signals; the ranker only consumes them.
    pub fn is_functional(&self) -> bool {
        !matches!(self, Self::Ranker)
    }

    /// The signal a functional stage emits.
    pub fn signal_name(&self) -> Option<&'static str> {
        match self {
            Self::IntentMatcher => Some(SIGNAL_INTENT_SIMILARITY),
            Self::Subsumption => Some(SIGNAL_SUBSUMPTION_PASS),
            Self::ConstraintValidator => Some(SIGNAL_CONSTRAINT_CONFORMS),
            Self::Ranker => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(trimmed) || k.alias().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownStage {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for StageKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StageKind> for String {
    fn from(kind: StageKind) -> Self {
        kind.name().to_string()
    }
}

/// Uniform output of a functional stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageResult {
    /// Candidate ids kept by the stage, in stage order.
    pub kept: Vec<String>,
    /// Signals for kept (and possibly dropped) candidates.
    pub signals: Vec<(String, Signal)>,
    pub metadata: serde_json::Value,
}

impl StageResult {
    pub fn new(kept: Vec<String>) -> Self {
        Self {
            kept,
            signals: Vec::new(),
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_signal(mut self, candidate_id: impl Into<String>, signal: Signal) -> Self {
        self.signals.push((candidate_id.into(), signal));
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Split into the kept set and the ledger delta to merge.
    pub fn into_parts(self) -> (Vec<String>, LedgerDelta, serde_json::Value) {
        let delta = self.signals.into_iter().collect();
        (self.kept, delta, self.metadata)
    }
}

/// How a stage ended within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome {
    Succeeded,
    Failed {
        kind: StageFailureKind,
        message: String,
    },
    Skipped {
        reason: String,
    },
}

impl StageOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Per-stage performance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePerformance {
    pub stage: StageKind,
    pub elapsed_ms: f64,
    /// Size of the current candidate set after the stage.
    pub candidate_count: usize,
    pub outcome: StageOutcome,
    pub over_budget: bool,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}
