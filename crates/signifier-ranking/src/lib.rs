//! # signifier-ranking
//!
//! Pure ranking of a signal ledger:
//! gate veto → weight-normalized score → specificity tie-break → explanation.

pub mod explain;
pub mod ranker;
pub mod weights;

pub use ranker::{rank, RankCandidate, Ranker, RankerSettings};
pub use weights::RankingWeights;
