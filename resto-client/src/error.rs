//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (rejected by the backend, e.g. constraint violation)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map to the unified error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            ClientError::Http(_) => ErrorCode::NetworkError,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidFormat
            }
            ClientError::Unauthorized => ErrorCode::NotAuthenticated,
            ClientError::Forbidden(_) => ErrorCode::PermissionDenied,
            ClientError::NotFound(_) => ErrorCode::NotFound,
            ClientError::Validation(_) => ErrorCode::ValidationFailed,
            ClientError::Internal(_) => ErrorCode::DatabaseError,
            ClientError::Config(_) => ErrorCode::ConfigError,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(
            ClientError::Validation("dup".into()).code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ClientError::Internal("boom".into()).code(),
            ErrorCode::DatabaseError
        );
        assert_eq!(
            ClientError::Config("no url".into()).code(),
            ErrorCode::ConfigError
        );
    }

    #[test]
    fn test_into_app_error_keeps_message() {
        let app: AppError = ClientError::Forbidden("row level security".into()).into();
        assert_eq!(app.code, ErrorCode::PermissionDenied);
        assert_eq!(app.message, "Permission denied: row level security");
    }
}
