use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use signifier_core::config::{defaults, validate_weight};
use signifier_core::constants::{
    SIGNAL_CONSTRAINT_CONFORMS, SIGNAL_INTENT_SIMILARITY, SIGNAL_SUBSUMPTION_PASS,
};
use signifier_core::errors::ConfigError;

/// Per-signal ranking weights. Always passed explicitly to the ranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingWeights {
    weights: BTreeMap<String, f64>,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            weights: BTreeMap::from([
                (SIGNAL_INTENT_SIMILARITY.to_string(), defaults::DEFAULT_INTENT_WEIGHT),
                (SIGNAL_CONSTRAINT_CONFORMS.to_string(), defaults::DEFAULT_CONSTRAINT_WEIGHT),
                (SIGNAL_SUBSUMPTION_PASS.to_string(), defaults::DEFAULT_SUBSUMPTION_WEIGHT),
            ]),
        }
    }
}

impl RankingWeights {
    /// Replace any subset of weights. Every override must name a known
    /// signal and be finite and non-negative.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        for (signal, weight) in overrides {
            validate_weight(signal, *weight)?;
            self.weights.insert(signal.clone(), *weight);
        }
        Ok(self)
    }

    /// Weight for `signal`, or `None` if the signal is not weighted.
    pub fn get(&self, signal: &str) -> Option<f64> {
        self.weights.get(signal).copied()
    }

    /// Every weight multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            weights: self
                .weights
                .iter()
                .map(|(k, v)| (k.clone(), v * factor))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
