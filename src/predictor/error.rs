use crate::encoding::UnknownCategory;

/// Rejected prediction input, reported back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("`{field}` must be {expected}, got {value}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}
