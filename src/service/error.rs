//! Error type for domain service operations.

use thiserror::Error;

use crate::model::ReservationError;
use crate::repository::RepositoryError;

/// Outcome kinds a service call can fail with.
///
/// Every expected failure maps to one of the first three kinds; `Unexpected`
/// is reserved for storage faults the caller cannot act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Bad input, authorization failure or business-rule violation.
    #[error("{0}")]
    Validation(String),
    /// The targeted entity does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The entity changed since it was read; re-fetch and resubmit.
    #[error("{0}")]
    ConcurrencyConflict(String),
    /// Storage or serialization fault.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::ConcurrencyConflict(_) => 409,
            ServiceError::Unexpected(_) => 500,
        }
    }

    /// Reservation writes report lost races as validation failures.
    pub(crate) fn from_reservation_write(err: RepositoryError) -> Self {
        if err.is_conflict() {
            ServiceError::Validation(
                "This gift item was modified by someone else at the same time; \
                 refresh and try again"
                    .to_string(),
            )
        } else {
            err.into()
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => ServiceError::NotFound(err.to_string()),
            RepositoryError::AlreadyExists { .. } => ServiceError::Validation(err.to_string()),
            RepositoryError::ConcurrencyConflict { .. } => {
                ServiceError::ConcurrencyConflict(err.to_string())
            }
            RepositoryError::Store(inner) => ServiceError::Unexpected(inner.to_string()),
        }
    }
}

impl From<ReservationError> for ServiceError {
    fn from(err: ReservationError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
