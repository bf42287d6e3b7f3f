use serde::{Deserialize, Serialize};

use super::defaults;

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub json_logs: bool,
    /// Maximum entries kept by the retrieval log.
    pub retrieval_log_capacity: usize,
    /// Maximum failures kept by the degradation tracker.
    pub degradation_history_capacity: usize,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            json_logs: defaults::DEFAULT_JSON_LOGS,
            retrieval_log_capacity: defaults::DEFAULT_RETRIEVAL_LOG_CAPACITY,
            degradation_history_capacity: defaults::DEFAULT_DEGRADATION_HISTORY_CAPACITY,
        }
    }
}
