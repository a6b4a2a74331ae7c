use thiserror::Error;

/// A domain invariant was violated while constructing a model value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Constraint violation: {message}")]
pub struct ConstraintViolation {
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
