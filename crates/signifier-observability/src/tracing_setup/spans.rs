//! Span definitions per operation: retrieval run, stage, subsumption,
//! validation, matching.

/// Create a retrieval run span.
#[macro_export]
macro_rules! retrieval_span {
    ($request_id:expr, $query:expr) => {
        tracing::info_span!("signifier.retrieval", request_id = %$request_id, query = %$query)
    };
}

/// Create a pipeline stage span.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr, $candidates:expr) => {
        tracing::info_span!("signifier.stage", stage = %$stage, candidates = $candidates)
    };
}

/// Create a subsumption span.
#[macro_export]
macro_rules! subsumption_span {
    ($candidates:expr) => {
        tracing::debug_span!("signifier.subsumption", candidates = $candidates)
    };
}

/// Create a validation span.
#[macro_export]
macro_rules! validation_span {
    ($candidates:expr, $parallel:expr) => {
        tracing::debug_span!("signifier.validation", candidates = $candidates, parallel = $parallel)
    };
}

/// Create a matching span.
#[macro_export]
macro_rules! matching_span {
    ($version:expr, $k:expr) => {
        tracing::debug_span!("signifier.matching", version = %$version, k = $k)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "signifier.retrieval";
    pub const STAGE: &str = "signifier.stage";
    pub const SUBSUMPTION: &str = "signifier.subsumption";
    pub const VALIDATION: &str = "signifier.validation";
    pub const MATCHING: &str = "signifier.matching";
}
