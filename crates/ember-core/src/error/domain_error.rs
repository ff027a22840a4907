//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AggregateId, DetailId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Engagement aggregate not found: {0}")]
    AggregateNotFound(AggregateId),

    #[error("Engagement detail not found: {0}")]
    DetailNotFound(DetailId),

    #[error("Reaction record not found for pair ({actor}, {target})")]
    ReactionNotFound { actor: UserId, target: UserId },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Unknown engagement kind: {0}")]
    UnknownEngagementKind(String),

    #[error("Unknown target kind: {0}")]
    UnknownTargetKind(String),

    #[error("Unknown reaction: {0}")]
    UnknownReaction(String),

    #[error("Invalid engagement amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    // =========================================================================
    // Concurrency
    // =========================================================================
    #[error("Concurrent modification, retry the operation")]
    ConcurrencyConflict,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AggregateNotFound(_) => "UNKNOWN_AGGREGATE",
            Self::DetailNotFound(_) => "UNKNOWN_DETAIL",
            Self::ReactionNotFound { .. } => "UNKNOWN_REACTION_RECORD",

            Self::UnknownEngagementKind(_) => "UNKNOWN_ENGAGEMENT_KIND",
            Self::UnknownTargetKind(_) => "UNKNOWN_TARGET_KIND",
            Self::UnknownReaction(_) => "UNKNOWN_REACTION",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidCoordinates { .. } => "INVALID_COORDINATES",

            Self::ConcurrencyConflict => "CONCURRENCY_CONFLICT",

            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::AggregateNotFound(_)
                | Self::DetailNotFound(_)
                | Self::ReactionNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownEngagementKind(_)
                | Self::UnknownTargetKind(_)
                | Self::UnknownReaction(_)
                | Self::InvalidAmount(_)
                | Self::InvalidCoordinates { .. }
        )
    }

    /// Check if the caller may retry the failed operation as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::UserNotFound(UserId::generate());
        assert_eq!(err.code(), "UNKNOWN_USER");

        let err = DomainError::UnknownEngagementKind("applause".to_string());
        assert_eq!(err.code(), "UNKNOWN_ENGAGEMENT_KIND");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::AggregateNotFound(AggregateId::generate()).is_not_found());
        assert!(!DomainError::ConcurrencyConflict.is_not_found());
    }

    #[test]
    fn test_retryable() {
        assert!(DomainError::ConcurrencyConflict.is_retryable());
        assert!(!DomainError::DatabaseError("boom".into()).is_retryable());
        assert!(!DomainError::InvalidAmount("x".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::UnknownReaction("meh".to_string());
        assert_eq!(err.to_string(), "Unknown reaction: meh");
    }
}
