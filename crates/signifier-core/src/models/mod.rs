mod candidate;
mod conformance;
mod degradation_event;
mod ledger;
mod match_score;
mod request;
mod response;
mod scalar;
mod signal;
mod snapshot;
mod stage;

pub use candidate::{
    Candidate, ComparisonOperator, IntentDescription, SignifierStatus, StructuredCondition,
    ValueCondition,
};
pub use conformance::{ConformanceReport, Severity, ShapeViolation};
pub use degradation_event::DegradationEvent;
pub use ledger::{LedgerDelta, SignalLedger};
pub use match_score::{MatchScore, MatcherInfo};
pub use request::{PipelineOverrides, RetrievalRequest};
pub use response::{FinalResultEntry, ResultSummary, RetrievalResponse, RunStatus};
pub use scalar::ScalarValue;
pub use signal::{Signal, SignalValue};
pub use snapshot::EnvironmentSnapshot;
pub use stage::{StageKind, StageOutcome, StagePerformance, StageResult};
