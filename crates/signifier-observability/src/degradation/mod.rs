//! Degradation tracking for non-mandatory stage failures.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, StageHealth};
