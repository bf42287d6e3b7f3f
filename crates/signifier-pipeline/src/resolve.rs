//! Resolution of request-scoped overrides against the loaded config.
//!
//! Everything that can be wrong with a request is rejected here, before
//! any stage runs.

use std::collections::HashSet;

use signifier_core::config::{
    check_ranker_ordering, parse_stage_list, LatencyBudgets, SignifierConfig, StageTimeouts,
    SubsumptionConfig,
};
use signifier_core::errors::{SignifierError, SignifierResult};
use signifier_core::models::{RetrievalRequest, StageKind};
use signifier_ranking::{RankerSettings, RankingWeights};

/// The effective pipeline for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPipeline {
    pub stages: Vec<StageKind>,
    pub mandatory: HashSet<StageKind>,
    pub k: usize,
    pub matcher_version: String,
    pub weights: RankingWeights,
    pub ranker: RankerSettings,
    pub subsumption: SubsumptionConfig,
    pub narrow_on_subsumption: bool,
    pub timeouts_ms: StageTimeouts,
    pub budgets_ms: LatencyBudgets,
}

impl ResolvedPipeline {
    pub fn resolve(config: &SignifierConfig, request: &RetrievalRequest) -> SignifierResult<Self> {
        if request.intent_query.trim().is_empty() {
            return Err(SignifierError::InvalidRequest {
                reason: "intent query cannot be empty".to_string(),
            });
        }
        let overrides = &request.pipeline;

        let mut stages = match &overrides.stages {
            Some(names) => parse_stage_list(names)?,
            None => parse_stage_list(&config.pipeline.stages)?,
        };
        let mut disabled = HashSet::new();
        for (name, enabled) in &overrides.enabled {
            let kind: StageKind = name.parse()?;
            if !enabled {
                disabled.insert(kind);
            }
        }
        stages.retain(|s| !disabled.contains(s));
        if config.pipeline.strict_ordering {
            check_ranker_ordering(&stages)?;
        }

        let mandatory = match &overrides.mandatory_stages {
            Some(names) => parse_stage_list(names)?,
            None => parse_stage_list(&config.pipeline.mandatory_stages)?,
        }
        .into_iter()
        .collect();

        let k = overrides.k.unwrap_or(config.matching.default_k);
        if k == 0 || k > config.matching.max_k {
            return Err(SignifierError::InvalidRequest {
                reason: format!("k must be between 1 and {}, got {k}", config.matching.max_k),
            });
        }

        let weights = RankingWeights::default()
            .with_overrides(&config.ranking.weights)?
            .with_overrides(&overrides.ranking_weights)?;

        let subsumption = SubsumptionConfig {
            missing_value_policy: overrides
                .missing_value_policy
                .unwrap_or(config.subsumption.missing_value_policy),
            type_coercion: overrides
                .type_coercion
                .unwrap_or(config.subsumption.type_coercion),
        };

        Ok(Self {
            stages,
            mandatory,
            k,
            matcher_version: overrides
                .matcher_version
                .clone()
                .unwrap_or_else(|| config.matching.default_version.clone()),
            weights,
            ranker: RankerSettings::from(&config.ranking),
            subsumption,
            narrow_on_subsumption: overrides
                .narrow_on_subsumption
                .unwrap_or(config.pipeline.narrow_on_subsumption),
            timeouts_ms: config.pipeline.timeouts_ms,
            budgets_ms: config.pipeline.latency_budgets_ms,
        })
    }

    pub fn is_mandatory(&self, stage: StageKind) -> bool {
        self.mandatory.contains(&stage)
    }
}
