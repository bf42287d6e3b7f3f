//! # signifier-pipeline
//!
//! Retrieval pipeline orchestration: resolves a request against the
//! config, loads candidates, runs the configured stages in order, and
//! ranks the survivors.
//!
//! ```text
//! request → resolve → load candidates → IM → SSF → SV → Ranker → response
//! ```

pub mod cancellation;
pub mod orchestrator;
pub mod resolve;
pub mod source;
pub mod stage;
pub mod stages;

pub use cancellation::CancellationToken;
pub use orchestrator::RetrievalOrchestrator;
pub use resolve::ResolvedPipeline;
pub use source::InMemoryCandidateSource;
pub use stage::{PipelineStage, RunContext, StageInput};
pub use stages::{ConstraintStage, IntentMatchStage, SubsumptionStage};
