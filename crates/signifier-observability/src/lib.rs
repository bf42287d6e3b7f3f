//! # signifier-observability
//!
//! Tracing setup, span macros, structured events, the retrieval run log,
//! and degradation tracking.

pub mod degradation;
pub mod retrieval_log;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, StageHealth};
pub use retrieval_log::{RetrievalLog, RetrievalLogEntry};
pub use tracing_setup::{init_tracing, init_tracing_with_filter, try_init_tracing};
