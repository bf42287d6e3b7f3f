use crate::errors::SignifierResult;
use crate::models::{ConformanceReport, EnvironmentSnapshot};

/// Validates a candidate's constraint shapes against an environment snapshot.
pub trait IConstraintValidator: Send + Sync {
    fn name(&self) -> &str;

    /// Returns conformance plus violation detail. Malformed shape documents
    /// are an error, not a non-conforming report.
    fn validate(
        &self,
        shapes: &serde_json::Value,
        snapshot: &EnvironmentSnapshot,
    ) -> SignifierResult<ConformanceReport>;
}
