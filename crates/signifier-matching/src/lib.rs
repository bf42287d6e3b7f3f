//! # signifier-matching
//!
//! Reference intent matchers behind a versioned registry:
//! - `v0` lexical token containment
//! - `v1` embedding cosine similarity over a pluggable provider

pub mod cache;
pub mod embedding;
pub mod lexical;
pub mod providers;
pub mod registry;
pub mod text;

pub use cache::{CacheStats, EmbeddingCache};
pub use embedding::EmbeddingMatcher;
pub use lexical::LexicalMatcher;
pub use providers::HashedTermProvider;
pub use registry::MatcherRegistry;

use std::cmp::Ordering;

use signifier_core::models::MatchScore;

/// Sort by similarity descending, ties by candidate id, then keep `k`.
pub(crate) fn top_k(mut scores: Vec<MatchScore>, k: usize) -> Vec<MatchScore> {
    scores.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
    scores.truncate(k);
    scores
}
