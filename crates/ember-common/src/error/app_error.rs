//! Application error types
//!
//! Unified error handling for the layers above the domain.

use ember_core::DomainError;
use serde::Serialize;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,

            // Map domain errors to appropriate status codes
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_validation() {
                    400
                } else if e.is_retryable() {
                    409
                } else {
                    500
                }
            }
        }
    }

    /// Get the error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the caller may retry the operation unchanged
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_retryable())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error body for the HTTP collaborator
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::UserId;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Validation("bad".into()).status_code(), 400);
        assert_eq!(AppError::NotFound("user".into()).status_code(), 404);
        assert_eq!(AppError::Database("down".into()).status_code(), 500);
    }

    #[test]
    fn test_domain_error_mapping() {
        let err = AppError::from(DomainError::UserNotFound(UserId::generate()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_USER");

        let err = AppError::from(DomainError::ConcurrencyConflict);
        assert_eq!(err.status_code(), 409);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_error_response() {
        let err = AppError::from(DomainError::ConcurrencyConflict);
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "CONCURRENCY_CONFLICT");
        assert!(body.retryable);
    }
}
