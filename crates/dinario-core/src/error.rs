use dinario_domain::{IdsExhausted, RecordId, RecordKind, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("{kind} record not found: {id}")]
    NotFound { kind: RecordKind, id: RecordId },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<IdsExhausted> for CoreError {
    fn from(err: IdsExhausted) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl CoreError {
    /// Returns `true` for input the caller can correct and resubmit.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}
