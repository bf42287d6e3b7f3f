//! Configuration for the signifier pipeline.
//!
//! Every section is `#[serde(default)]`, so a partial `signifier.toml`
//! (or none at all) yields a usable config.

pub mod defaults;
mod matching_config;
mod observability_config;
mod pipeline_config;
mod ranking_config;
mod subsumption_config;
mod validation_config;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use matching_config::MatchingConfig;
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::{LatencyBudgets, PipelineConfig, StageTimeouts};
pub use ranking_config::RankingConfig;
pub use subsumption_config::{MissingValuePolicy, SubsumptionConfig};
pub use validation_config::ValidationConfig;

use crate::constants::{is_known_signal, MAX_TOP_K};
use crate::errors::ConfigError;
use crate::models::StageKind;

pub const ENV_LOG_LEVEL: &str = "SIGNIFIER_LOG_LEVEL";
pub const ENV_MATCHER_VERSION: &str = "SIGNIFIER_MATCHER_VERSION";
pub const ENV_DEFAULT_K: &str = "SIGNIFIER_DEFAULT_K";
pub const ENV_MISSING_VALUE_POLICY: &str = "SIGNIFIER_MISSING_VALUE_POLICY";

/// Top-level configuration aggregating all sections.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SIGNIFIER_*`)
/// 2. Config file (`signifier.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignifierConfig {
    pub pipeline: PipelineConfig,
    pub ranking: RankingConfig,
    pub subsumption: SubsumptionConfig,
    pub matching: MatchingConfig,
    pub validation: ValidationConfig,
    pub observability: ObservabilityConfig,
}

impl SignifierConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path`, apply environment overrides and validate.
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SIGNIFIER_*` environment variables.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Separated from the
    /// process environment so it can be exercised without touching it.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.observability.log_level = level;
        }
        if let Some(version) = lookup(ENV_MATCHER_VERSION) {
            self.matching.default_version = version;
        }
        if let Some(raw) = lookup(ENV_DEFAULT_K) {
            self.matching.default_k =
                raw.trim().parse::<usize>().map_err(|e| ConfigError::ValidationFailed {
                    field: ENV_DEFAULT_K.to_string(),
                    message: e.to_string(),
                })?;
        }
        if let Some(raw) = lookup(ENV_MISSING_VALUE_POLICY) {
            self.subsumption.missing_value_policy = raw.parse()?;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let stages = parse_stage_list(&self.pipeline.stages)?;
        if self.pipeline.strict_ordering {
            check_ranker_ordering(&stages)?;
        }
        parse_stage_list(&self.pipeline.mandatory_stages)?;

        for (signal, weight) in &self.ranking.weights {
            validate_weight(signal, *weight)?;
        }
        if !(0.0..=1.0).contains(&self.ranking.gate_pass_threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "ranking.gate_pass_threshold".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if !self.ranking.tie_epsilon.is_finite() || self.ranking.tie_epsilon <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "ranking.tie_epsilon".to_string(),
                message: "must be a positive finite number".to_string(),
            });
        }

        if self.matching.max_k == 0 || self.matching.max_k > MAX_TOP_K {
            return Err(ConfigError::ValidationFailed {
                field: "matching.max_k".to_string(),
                message: format!("must be between 1 and {MAX_TOP_K}"),
            });
        }
        if self.matching.default_k == 0 || self.matching.default_k > self.matching.max_k {
            return Err(ConfigError::ValidationFailed {
                field: "matching.default_k".to_string(),
                message: format!("must be between 1 and {}", self.matching.max_k),
            });
        }
        if !(0.0..=1.0).contains(&self.matching.min_similarity) {
            return Err(ConfigError::ValidationFailed {
                field: "matching.min_similarity".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if self.matching.embedding_dimensions == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "matching.embedding_dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        for (field, capacity) in [
            ("observability.retrieval_log_capacity", self.observability.retrieval_log_capacity),
            ("observability.degradation_history_capacity", self.observability.degradation_history_capacity),
        ] {
            if capacity == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }

        for stage in StageKind::DEFAULT_ORDER {
            if self.pipeline.timeouts_ms.for_stage(stage) == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("pipeline.timeouts_ms.{stage}"),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Parse stage identifiers, rejecting unknown names and duplicates.
pub fn parse_stage_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<StageKind>, ConfigError> {
    let mut seen = HashSet::new();
    let mut stages = Vec::with_capacity(names.len());
    for name in names {
        let kind: StageKind = name.as_ref().parse()?;
        if !seen.insert(kind) {
            return Err(ConfigError::DuplicateStage {
                stage: kind.to_string(),
            });
        }
        stages.push(kind);
    }
    Ok(stages)
}

/// Reject a ranker placed before a functional stage whose signal it weights.
pub fn check_ranker_ordering(stages: &[StageKind]) -> Result<(), ConfigError> {
    let Some(ranker_at) = stages.iter().position(|s| *s == StageKind::Ranker) else {
        return Ok(());
    };
    match stages[ranker_at + 1..].iter().find(|s| s.is_functional()) {
        Some(late) => Err(ConfigError::RankerBeforeWeightedStage {
            stage: late.to_string(),
        }),
        None => Ok(()),
    }
}

/// A weight override must name a known signal and be finite and non-negative.
pub fn validate_weight(signal: &str, weight: f64) -> Result<(), ConfigError> {
    if !is_known_signal(signal) {
        return Err(ConfigError::UnknownSignal {
            name: signal.to_string(),
        });
    }
    if !weight.is_finite() || weight < 0.0 {
        return Err(ConfigError::InvalidWeight {
            signal: signal.to_string(),
            value: weight,
        });
    }
    Ok(())
}
