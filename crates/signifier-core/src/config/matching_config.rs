use serde::{Deserialize, Serialize};

use super::defaults;

/// Intent matcher configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Matcher version used when a request does not name one.
    pub default_version: String,
    pub default_k: usize,
    pub max_k: usize,
    pub case_sensitive: bool,
    /// Embedding matches below this similarity are dropped.
    pub min_similarity: f64,
    pub embedding_dimensions: usize,
    /// L1 embedding cache capacity (entries).
    pub embedding_cache_size: u64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_version: defaults::DEFAULT_MATCHER_VERSION.to_string(),
            default_k: defaults::DEFAULT_TOP_K,
            max_k: crate::constants::MAX_TOP_K,
            case_sensitive: defaults::DEFAULT_CASE_SENSITIVE,
            min_similarity: defaults::DEFAULT_MIN_SIMILARITY,
            embedding_dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            embedding_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
