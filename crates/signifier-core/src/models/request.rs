use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::EnvironmentSnapshot;
use crate::config::MissingValuePolicy;

/// One retrieval request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalRequest {
    pub intent_query: String,
    #[serde(default)]
    pub environment: EnvironmentSnapshot,
    #[serde(default)]
    pub pipeline: PipelineOverrides,
}

impl RetrievalRequest {
    pub fn new(intent_query: impl Into<String>, environment: EnvironmentSnapshot) -> Self {
        Self {
            intent_query: intent_query.into(),
            environment,
            pipeline: PipelineOverrides::default(),
        }
    }

    pub fn with_pipeline(mut self, pipeline: PipelineOverrides) -> Self {
        self.pipeline = pipeline;
        self
    }
}

/// Request-scoped pipeline configuration. Unset fields fall back to the
/// loaded [`SignifierConfig`](crate::SignifierConfig).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOverrides {
    /// Ordered stage identifiers (canonical names or aliases).
    pub stages: Option<Vec<String>>,
    /// Per-stage enable flags; `false` omits the stage.
    pub enabled: BTreeMap<String, bool>,
    pub k: Option<usize>,
    pub matcher_version: Option<String>,
    pub ranking_weights: BTreeMap<String, f64>,
    pub mandatory_stages: Option<Vec<String>>,
    pub narrow_on_subsumption: Option<bool>,
    pub missing_value_policy: Option<MissingValuePolicy>,
    pub type_coercion: Option<bool>,
}

impl PipelineOverrides {
    pub fn with_stages<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stages = Some(stages.into_iter().map(Into::into).collect());
        self
    }

    pub fn disable(mut self, stage: impl Into<String>) -> Self {
        self.enabled.insert(stage.into(), false);
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_weight(mut self, signal: impl Into<String>, weight: f64) -> Self {
        self.ranking_weights.insert(signal.into(), weight);
        self
    }

    pub fn with_mandatory<I, S>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory_stages = Some(stages.into_iter().map(Into::into).collect());
        self
    }
}
