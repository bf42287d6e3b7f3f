mod candidate_source;
mod constraint_validator;
mod embedding;
mod intent_matcher;

pub use candidate_source::ICandidateSource;
pub use constraint_validator::IConstraintValidator;
pub use embedding::IEmbeddingProvider;
pub use intent_matcher::IIntentMatcher;
