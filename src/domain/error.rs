//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent precondition violations of the ordered store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid entry: {reason}")]
    InvalidEntry { reason: String },
}

impl DomainError {
    pub fn missing_key() -> Self {
        Self::InvalidEntry {
            reason: "entry has no ordering key".to_string(),
        }
    }
}

/// Result type for store operations.
pub type DomainResult<T> = Result<T, DomainError>;
