#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use signifier_core::config::SignifierConfig;
use signifier_core::errors::{SignifierError, SignifierResult};
use signifier_core::models::{Candidate, MatchScore, MatcherInfo, RetrievalRequest};
use signifier_core::traits::IIntentMatcher;
use signifier_matching::MatcherRegistry;
use signifier_pipeline::{InMemoryCandidateSource, RetrievalOrchestrator};

pub const FIXED_VERSION: &str = "fixed";

/// Gives every candidate the same similarity, optionally after a delay.
pub struct FixedMatcher {
    pub similarity: f64,
    pub delay: Option<Duration>,
    pub fail: bool,
}

impl FixedMatcher {
    pub fn new(similarity: f64) -> Self {
        Self {
            similarity,
            delay: None,
            fail: false,
        }
    }

    pub fn slow(similarity: f64, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(similarity)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0.0)
        }
    }
}

impl IIntentMatcher for FixedMatcher {
    fn version(&self) -> &str {
        FIXED_VERSION
    }

    fn info(&self) -> MatcherInfo {
        MatcherInfo {
            version: FIXED_VERSION.into(),
            name: "Fixed".into(),
            description: "constant similarity".into(),
            parameters: json!({ "similarity": self.similarity }),
            latency_budget_ms: 30,
        }
    }

    fn match_intent(
        &self,
        _query: &str,
        candidates: &[&Candidate],
        k: usize,
    ) -> SignifierResult<Vec<MatchScore>> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.fail {
            return Err(SignifierError::InvalidRequest {
                reason: "matcher backend unavailable".into(),
            });
        }
        Ok(candidates
            .iter()
            .take(k)
            .map(|c| MatchScore::new(c.id.clone(), self.similarity))
            .collect())
    }
}

/// A golden pipeline scenario from `test-fixtures/golden/pipeline`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub request: RetrievalRequest,
    pub matcher_similarity: f64,
    pub candidates: Vec<Candidate>,
    pub expected: serde_json::Value,
}

pub fn load_scenario(name: &str) -> Scenario {
    test_fixtures::load_fixture(&format!("golden/pipeline/{name}.json"))
}

pub fn fixed_config() -> SignifierConfig {
    let mut config = SignifierConfig::default();
    config.matching.default_version = FIXED_VERSION.into();
    config
}

pub fn orchestrator_with(
    config: SignifierConfig,
    matcher: FixedMatcher,
    candidates: Vec<Candidate>,
) -> RetrievalOrchestrator {
    let registry = MatcherRegistry::new();
    registry.register(Arc::new(matcher));
    RetrievalOrchestrator::with_registry(
        config,
        Arc::new(InMemoryCandidateSource::new("test", candidates)),
        Arc::new(registry),
    )
    .expect("valid config")
}

pub fn orchestrator(similarity: f64, candidates: Vec<Candidate>) -> RetrievalOrchestrator {
    orchestrator_with(fixed_config(), FixedMatcher::new(similarity), candidates)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
