//! `v1`: embedding cosine similarity.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use signifier_core::config::{defaults, MatchingConfig};
use signifier_core::errors::{MatchingError, SignifierError, SignifierResult};
use signifier_core::models::{Candidate, MatchScore, MatcherInfo};
use signifier_core::traits::{IEmbeddingProvider, IIntentMatcher};

use crate::cache::{CacheStats, EmbeddingCache};
use crate::text::embedding_text;
use crate::top_k;

pub const EMBEDDING_VERSION: &str = "v1";

/// Cosine similarity between query and candidate embeddings, mapped from
/// [-1, 1] to [0, 1]. Candidate embeddings are cached.
pub struct EmbeddingMatcher {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: EmbeddingCache,
    min_similarity: f64,
}

impl EmbeddingMatcher {
    pub fn new(provider: Arc<dyn IEmbeddingProvider>, config: &MatchingConfig) -> Self {
        Self {
            provider,
            cache: EmbeddingCache::new(config.embedding_cache_size),
            min_similarity: config.min_similarity,
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    fn embed(&self, text: &str) -> SignifierResult<Vec<f32>> {
        self.provider.embed(text).map_err(|e| match e {
            SignifierError::Matching(inner) => SignifierError::Matching(inner),
            other => MatchingError::EmbeddingFailed {
                provider: self.provider.name().to_string(),
                reason: other.to_string(),
            }
            .into(),
        })
    }

    fn candidate_embedding(&self, candidate: &Candidate) -> SignifierResult<Vec<f32>> {
        let text = embedding_text(candidate);
        let key = EmbeddingCache::key(&candidate.id, &text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let embedding = self.embed(&text)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }
}

/// Cosine similarity; 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let na: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    if na <= f64::EPSILON || nb <= f64::EPSILON {
        return 0.0;
    }
    dot / (na * nb)
}

impl IIntentMatcher for EmbeddingMatcher {
    fn version(&self) -> &str {
        EMBEDDING_VERSION
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            version: EMBEDDING_VERSION.to_string(),
            name: "embedding".to_string(),
            description: "Cosine similarity between query and intent embeddings".to_string(),
            parameters: json!({
                "provider": self.provider.name(),
                "dimensions": self.provider.dimensions(),
                "minSimilarity": self.min_similarity,
            }),
            latency_budget_ms: defaults::DEFAULT_INTENT_BUDGET_MS as u64,
        }
    }

    fn match_intent(
        &self,
        query: &str,
        candidates: &[&Candidate],
        k: usize,
    ) -> SignifierResult<Vec<MatchScore>> {
        if query.trim().is_empty() {
            return Err(MatchingError::EmptyQuery.into());
        }
        if !self.provider.is_available() {
            return Err(MatchingError::EmbeddingFailed {
                provider: self.provider.name().to_string(),
                reason: "provider unavailable".to_string(),
            }
            .into());
        }

        let query_embedding = self.embed(query)?;
        let mut scores = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let embedding = self.candidate_embedding(candidate)?;
            let cosine = cosine_similarity(&query_embedding, &embedding);
            let similarity = ((cosine + 1.0) / 2.0).clamp(0.0, 1.0);
            if similarity >= self.min_similarity {
                let mut score = MatchScore::new(candidate.id.clone(), similarity);
                score.metadata = json!({ "cosine": cosine });
                scores.push(score);
            }
        }
        debug!(
            candidates = candidates.len(),
            kept = scores.len(),
            "embedding match computed"
        );
        Ok(top_k(scores, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashedTermProvider;

    fn matcher(min_similarity: f64) -> EmbeddingMatcher {
        let config = MatchingConfig {
            min_similarity,
            ..MatchingConfig::default()
        };
        EmbeddingMatcher::new(Arc::new(HashedTermProvider::new(128)), &config)
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn similarity_is_in_unit_interval_and_ranked() {
        let a = Candidate::new("a", "increase the room temperature");
        let b = Candidate::new("b", "turn off the lights");
        let scores = matcher(0.0)
            .match_intent("increase the temperature", &[&a, &b], 10)
            .unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].candidate_id, "a");
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.similarity)));
    }

    #[test]
    fn min_similarity_filters() {
        let a = Candidate::new("a", "increase the room temperature");
        let b = Candidate::new("b", "brew coffee");
        let scores = matcher(0.9)
            .match_intent("increase the room temperature", &[&a, &b], 10)
            .unwrap();
        let ids: Vec<_> = scores.iter().map(|s| s.candidate_id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn candidate_embeddings_are_cached() {
        let m = matcher(0.0);
        let a = Candidate::new("a", "open the window");
        m.match_intent("open window", &[&a], 5).unwrap();
        m.match_intent("close window", &[&a], 5).unwrap();
        let stats = m.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);

        m.clear_cache();
        assert_eq!(m.cache_stats().hits, 0);
    }
}
