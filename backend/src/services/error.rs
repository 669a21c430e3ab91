//! Errors produced by command and query handlers.

use crate::db::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a handler that did not succeed.
///
/// Domain failures (missing person, unmet precondition) are ordinary values of
/// this type, not panics; the HTTP layer turns each into a response envelope.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// A business rule that must hold before the write is attempted.
    #[error("{0}")]
    PreconditionFailed(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn person_not_found() -> Self {
        Self::NotFound("Person not found".to_string())
    }
}

/// Reject empty or whitespace-only text fields.
pub(crate) fn require_text(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        Err(ServiceError::InvalidInput(format!("{} is required", field)))
    } else {
        Ok(())
    }
}
