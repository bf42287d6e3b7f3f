use crate::errors::SignifierResult;
use crate::models::{Candidate, MatchScore, MatcherInfo};

/// Scores candidates against a free-text intent query.
pub trait IIntentMatcher: Send + Sync {
    /// Registry key, e.g. `"v0"`.
    fn version(&self) -> &str;

    fn info(&self) -> MatcherInfo;

    /// Return at most `k` scores sorted by similarity descending.
    fn match_intent(
        &self,
        query: &str,
        candidates: &[&Candidate],
        k: usize,
    ) -> SignifierResult<Vec<MatchScore>>;
}
