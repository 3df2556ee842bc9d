use thiserror::Error;

use crate::store::StoreError;

/// Domain-level outcome of a repository call that did not succeed.
///
/// `NotFound`, `AlreadyExists` and `ConcurrencyConflict` are expected
/// outcomes callers must handle; `Store` carries unexpected storage failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{entity} '{id}' already exists")]
    AlreadyExists { entity: &'static str, id: String },
    #[error("{entity} '{id}' was modified by someone else; reload it and try again")]
    ConcurrencyConflict { entity: &'static str, id: String },
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::ConcurrencyConflict { .. })
    }
}
