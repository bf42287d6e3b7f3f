//! `v0`: lexical token containment.

use serde_json::json;

use signifier_core::config::defaults;
use signifier_core::errors::{MatchingError, SignifierResult};
use signifier_core::models::{Candidate, MatchScore, MatcherInfo};
use signifier_core::traits::IIntentMatcher;

use crate::text::{candidate_tokens, tokenize};
use crate::top_k;

pub const LEXICAL_VERSION: &str = "v0";

/// Similarity = fraction of query tokens found among the candidate's tokens.
#[derive(Debug, Clone, Default)]
pub struct LexicalMatcher {
    case_sensitive: bool,
}

impl LexicalMatcher {
    pub fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }
}

impl IIntentMatcher for LexicalMatcher {
    fn version(&self) -> &str {
        LEXICAL_VERSION
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            version: LEXICAL_VERSION.to_string(),
            name: "lexical".to_string(),
            description: "Word token containment between query and intent text".to_string(),
            parameters: json!({ "caseSensitive": self.case_sensitive, "minTokenLength": 3 }),
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
        let query_tokens = tokenize(query, self.case_sensitive);
        if query_tokens.is_empty() {
            return Ok(Vec::new());
        }

        let scores = candidates
            .iter()
            .filter_map(|candidate| {
                let tokens = candidate_tokens(candidate, self.case_sensitive);
                let matched = query_tokens.intersection(&tokens).count();
                (matched > 0).then(|| {
                    let mut score = MatchScore::new(
                        candidate.id.clone(),
                        matched as f64 / query_tokens.len() as f64,
                    );
                    score.metadata = json!({ "matchedTokens": matched });
                    score
                })
            })
            .collect();

        Ok(top_k(scores, k))
    }
}
