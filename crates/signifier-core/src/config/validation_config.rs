use serde::{Deserialize, Serialize};

use super::defaults;

/// Constraint validator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Cache conformance reports keyed by (snapshot, shapes) hash.
    pub enable_caching: bool,
    pub cache_size: u64,
    /// Validate candidates in parallel inside the stage.
    pub parallel: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_caching: defaults::DEFAULT_VALIDATION_CACHING,
            cache_size: defaults::DEFAULT_VALIDATION_CACHE_SIZE,
            parallel: defaults::DEFAULT_VALIDATION_PARALLEL,
        }
    }
}
