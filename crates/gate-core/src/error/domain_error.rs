//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Rule not found: {0}")]
    RuleNotFound(i64),

    #[error("Command not found: {0}")]
    CommandNotFound(i64),

    #[error("Approval request not found: {0}")]
    ApprovalNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    // =========================================================================
    // Budget Errors
    // =========================================================================
    #[error("Insufficient credits")]
    InsufficientCredits,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Approval request has already been reviewed")]
    AlreadyReviewed,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::RuleNotFound(_) => "UNKNOWN_RULE",
            Self::CommandNotFound(_) => "UNKNOWN_COMMAND",
            Self::ApprovalNotFound(_) => "UNKNOWN_APPROVAL",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPattern(_) => "INVALID_PATTERN",

            // Budget
            Self::InsufficientCredits => "INSUFFICIENT_CREDITS",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::AlreadyReviewed => "ALREADY_REVIEWED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::RuleNotFound(_)
                | Self::CommandNotFound(_)
                | Self::ApprovalNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidPattern(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameAlreadyExists | Self::AlreadyReviewed)
    }
}
