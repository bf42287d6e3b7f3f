use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// What to do when a declared condition references a property absent
/// from the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    /// Condition is violated.
    #[default]
    Fail,
    /// Condition is skipped and not counted as checked.
    Ignore,
    /// Condition is satisfied.
    Pass,
}

impl MissingValuePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Ignore => "ignore",
            Self::Pass => "pass",
        }
    }
}

impl fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingValuePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "ignore" => Ok(Self::Ignore),
            "pass" => Ok(Self::Pass),
            other => Err(ConfigError::ValidationFailed {
                field: "subsumption.missing_value_policy".to_string(),
                message: format!("expected fail, ignore or pass, got '{other}'"),
            }),
        }
    }
}

/// Structured subsumption filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsumptionConfig {
    pub missing_value_policy: MissingValuePolicy,
    /// Coerce numeric strings to numbers before comparing.
    pub type_coercion: bool,
}

impl Default for SubsumptionConfig {
    fn default() -> Self {
        Self {
            missing_value_policy: MissingValuePolicy::default(),
            type_coercion: defaults::DEFAULT_TYPE_COERCION,
        }
    }
}
