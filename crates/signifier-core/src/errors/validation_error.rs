/// Constraint validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed constraint shapes: {reason}")]
    MalformedShapes { reason: String },

    #[error("unsupported datatype '{datatype}'")]
    UnsupportedDatatype { datatype: String },
}
