//! # signifier-core
//!
//! Foundation crate for the signifier retrieval pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SignifierConfig;
pub use errors::{SignifierError, SignifierResult};
pub use models::{
    Candidate, EnvironmentSnapshot, FinalResultEntry, RetrievalRequest, RetrievalResponse,
    ScalarValue, Signal, SignalLedger, SignalValue, StageKind, StageResult,
};
