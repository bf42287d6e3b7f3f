/// Intent matching errors.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("intent query cannot be empty")]
    EmptyQuery,

    #[error("matcher version '{version}' is not registered (available: {available})")]
    UnknownVersion { version: String, available: String },

    #[error("embedding provider '{provider}' failed: {reason}")]
    EmbeddingFailed { provider: String, reason: String },
}
