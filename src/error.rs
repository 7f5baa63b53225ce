use std::fmt;

use crate::store::StoreError;

/// Error type for model base operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// No record exists at the requested key. Recoverable; callers may treat
    /// this as absence.
    NotFound { model: String, key: String },
    /// Underlying store failure, surfaced unchanged.
    Store(StoreError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NotFound { model, key } => {
                write!(f, "couldn't find {} {}", model, key)
            }
            ModelError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::NotFound { .. } => None,
            ModelError::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for ModelError {
    fn from(err: StoreError) -> Self {
        ModelError::Store(err)
    }
}
