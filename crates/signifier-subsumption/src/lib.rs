//! # signifier-subsumption
//!
//! Structured subsumption filter (SSF). Checks a candidate's declared
//! conditions against the environment snapshot. Pure and infallible: every
//! problem is reported as a violation, never raised.

pub mod compare;
pub mod engine;
pub mod violation;

pub use engine::{evaluate, SubsumptionEngine, SubsumptionOutcome};
pub use violation::{Violation, ViolationKind};
