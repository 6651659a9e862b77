use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The upstream API could not be reached or answered with a failure
    /// status. Retryable.
    #[error("Repository unreachable: {0}")]
    Unreachable(String),

    /// The upstream answered but the body did not decode into the expected
    /// shape.
    #[error("Malformed repository response: {0}")]
    BadResponse(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::BadResponse(err.to_string())
        } else {
            RepositoryError::Unreachable(err.to_string())
        }
    }
}
