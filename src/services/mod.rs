use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod search;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or missing search input; the upstream is never contacted.
    #[error("Cannot proceed with missing, invalid, incomplete details")]
    Validation(String),

    /// Retry budget exhausted against the upstream repository.
    #[error("Unable to reach repository API for game cards")]
    RepositoryUnreachable,

    /// Any other failure while handling a search, wrapping the cause.
    #[error("Unable to handle your search request. Pls try again")]
    SearchFailed(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unreachable(_) => ServiceError::RepositoryUnreachable,
            RepositoryError::BadResponse(msg) | RepositoryError::Unexpected(msg) => {
                ServiceError::SearchFailed(msg)
            }
        }
    }
}
