use serde::{Deserialize, Serialize};

/// Similarity of one candidate to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub candidate_id: String,
    /// In [0, 1].
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl MatchScore {
    pub fn new(candidate_id: impl Into<String>, similarity: f64) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            similarity,
            metadata: serde_json::Value::Null,
        }
    }
}

/// Self-description of a registered matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatcherInfo {
    pub version: String,
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
    pub latency_budget_ms: u64,
}
