use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Ranker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Weight overrides keyed by signal name. Unset signals keep their default.
    pub weights: BTreeMap<String, f64>,
    /// Numeric gate signals pass at or above this value.
    pub gate_pass_threshold: f64,
    /// Scores closer than this are considered tied.
    pub tie_epsilon: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            weights: BTreeMap::new(),
            gate_pass_threshold: defaults::DEFAULT_GATE_PASS_THRESHOLD,
            tie_epsilon: defaults::DEFAULT_TIE_EPSILON,
        }
    }
}
