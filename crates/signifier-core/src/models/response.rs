use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Signal, StageKind, StagePerformance};

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResultEntry {
    pub candidate_id: String,
    pub final_score: f64,
    pub passed_gates: bool,
    pub specificity: usize,
    pub signals: Vec<Signal>,
    /// One line per signal, in ledger order.
    pub explanation: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub total: usize,
    pub passed_gates: usize,
    pub failed_gates: usize,
}

impl ResultSummary {
    pub fn from_results(results: &[FinalResultEntry]) -> Self {
        let passed = results.iter().filter(|r| r.passed_gates).count();
        Self {
            total: results.len(),
            passed_gates: passed,
            failed_gates: results.len() - passed,
        }
    }
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Failed {
        stage: StageKind,
        reason: String,
    },
    #[serde(rename_all = "camelCase")]
    Cancelled {
        skipped_stages: Vec<StageKind>,
    },
}

impl RunStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed { .. } => "failed",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalResponse {
    pub request_id: Uuid,
    pub status: RunStatus,
    pub results: Vec<FinalResultEntry>,
    pub stages: Vec<StagePerformance>,
    pub total_elapsed_ms: f64,
    pub summary: ResultSummary,
}

impl RetrievalResponse {
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    pub fn stage(&self, kind: StageKind) -> Option<&StagePerformance> {
        self.stages.iter().find(|s| s.stage == kind)
    }
}
