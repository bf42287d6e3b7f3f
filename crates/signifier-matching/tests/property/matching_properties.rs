use std::sync::Arc;

use proptest::prelude::*;

use signifier_core::config::MatchingConfig;
use signifier_core::models::Candidate;
use signifier_core::traits::IIntentMatcher;
use signifier_matching::{EmbeddingMatcher, HashedTermProvider, LexicalMatcher};

fn arb_candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec("[a-z]{3,8}( [a-z]{3,8}){0,5}", 0..12).prop_map(|texts| {
        texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| Candidate::new(format!("c{i:02}"), t))
            .collect()
    })
}

proptest! {
    #[test]
    fn lexical_scores_are_sorted_bounded_and_truncated(
        query in "[a-z]{3,8}( [a-z]{3,8}){0,4}",
        candidates in arb_candidates(),
        k in 1usize..10,
    ) {
        let refs: Vec<&Candidate> = candidates.iter().collect();
        let scores = LexicalMatcher::default().match_intent(&query, &refs, k).unwrap();
        prop_assert!(scores.len() <= k);
        prop_assert!(scores.iter().all(|s| s.similarity > 0.0 && s.similarity <= 1.0));
        for pair in scores.windows(2) {
            prop_assert!(
                pair[0].similarity > pair[1].similarity
                    || (pair[0].similarity == pair[1].similarity
                        && pair[0].candidate_id < pair[1].candidate_id)
            );
        }
    }

    #[test]
    fn embedding_similarity_in_unit_interval(
        query in "[a-z]{3,8}( [a-z]{3,8}){0,4}",
        candidates in arb_candidates(),
    ) {
        let matcher = EmbeddingMatcher::new(
            Arc::new(HashedTermProvider::new(64)),
            &MatchingConfig::default(),
        );
        let refs: Vec<&Candidate> = candidates.iter().collect();
        let scores = matcher.match_intent(&query, &refs, 100).unwrap();
        prop_assert_eq!(scores.len(), candidates.len());
        prop_assert!(scores.iter().all(|s| (0.0..=1.0).contains(&s.similarity)));
    }
}
