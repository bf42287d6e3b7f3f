use crate::errors::SignifierResult;
use crate::models::Candidate;

/// Read-only source of candidate signifiers.
pub trait ICandidateSource: Send + Sync {
    /// Human-readable source name, used in errors and logs.
    fn name(&self) -> &str;

    /// Materialize the candidate set for one request.
    fn load_candidates(&self) -> SignifierResult<Vec<Candidate>>;
}
