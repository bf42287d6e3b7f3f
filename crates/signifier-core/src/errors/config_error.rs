/// Configuration and request-validation errors.
///
/// Always surfaced before any stage executes.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown pipeline stage '{name}'")]
    UnknownStage { name: String },

    #[error("weight override references unknown signal '{name}'")]
    UnknownSignal { name: String },

    #[error("pipeline stage '{stage}' is listed more than once")]
    DuplicateStage { stage: String },

    #[error("ranker is placed before stage '{stage}' whose signal it weights")]
    RankerBeforeWeightedStage { stage: String },

    #[error("weight for signal '{signal}' must be finite and non-negative, got {value}")]
    InvalidWeight { signal: String, value: f64 },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
