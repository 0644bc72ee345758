//! Error handling utilities for repositories

use gate_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: i64) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "rule not found" error
pub fn rule_not_found(id: i64) -> DomainError {
    DomainError::RuleNotFound(id)
}

/// Create a "command not found" error
pub fn command_not_found(id: i64) -> DomainError {
    DomainError::CommandNotFound(id)
}

/// Create an "approval request not found" error
pub fn approval_not_found(id: i64) -> DomainError {
    DomainError::ApprovalNotFound(id)
}
