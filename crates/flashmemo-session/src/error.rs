//! Session error types.

use flashmemo_api::ApiError;
use flashmemo_storage::StorageError;
use thiserror::Error;

/// Error type for session operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend rejected or failed the request. Passed through unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Persisting or removing the session records failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid state transition in the session FSM
    #[error("Invalid session state transition: {0}")]
    InvalidStateTransition(String),

    /// An operation needs a signed-in user
    #[error("Not signed in")]
    NotSignedIn,
}

impl AuthError {
    /// Returns true if this error is transient and the operation can be retried.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Api(e) => e.is_transient(),
            _ => false,
        }
    }

    /// The underlying API error, if the failure came from the backend.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            AuthError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias using AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_keep_their_message() {
        let err = AuthError::from(ApiError::Status {
            status: 401,
            message: "Invalid credentials".into(),
        });
        assert_eq!(err.to_string(), "API error: 401 - Invalid credentials");
        assert!(matches!(
            err.as_api(),
            Some(ApiError::Status { status: 401, .. })
        ));
    }

    #[test]
    fn test_is_transient() {
        assert!(AuthError::from(ApiError::Status {
            status: 502,
            message: "bad gateway".into()
        })
        .is_transient());
        assert!(!AuthError::NotSignedIn.is_transient());
        assert!(!AuthError::InvalidStateTransition("x".into()).is_transient());
        assert!(!AuthError::Storage(StorageError::Backend("disk".into())).is_transient());
    }
}
