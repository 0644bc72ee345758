//! Repository traits (ports) - define the interface for data access
//!
//! Repositories are read-only: every state-changing write goes through the
//! `UnitOfWork` port instead, so multi-record transitions commit atomically.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    ApprovalRequest, ApprovalStatus, AuditAction, Command, CommandStatus, Rule, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by API key (authentication lookup)
    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// List all users, newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Rule Repository
// ============================================================================

#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Find rule by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Rule>>;

    /// List all rules in evaluation order (priority ascending, then ID
    /// ascending). The matcher calls this on every admission so rule
    /// changes take effect immediately.
    async fn list_ordered(&self) -> RepoResult<Vec<Rule>>;

    /// Total number of rules
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Command Repository
// ============================================================================

/// Filter options for command history queries
#[derive(Debug, Clone, Default)]
pub struct CommandQuery {
    /// Restrict to a single owner; `None` lists all users' commands
    pub user_id: Option<i64>,
    pub status: Option<CommandStatus>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait CommandRepository: Send + Sync {
    /// Find command by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Command>>;

    /// List commands matching the query, newest first
    async fn list(&self, query: CommandQuery) -> RepoResult<Vec<Command>>;

    /// Count commands grouped by status, optionally restricted to one owner
    async fn count_by_status(&self, user_id: Option<i64>) -> RepoResult<Vec<(CommandStatus, i64)>>;
}

// ============================================================================
// Approval Repository
// ============================================================================

/// A pending approval request joined with its command and requester,
/// shaped for the admin review queue
#[derive(Debug, Clone)]
pub struct PendingApproval {
    pub approval: ApprovalRequest,
    pub command_text: String,
    pub requested_by_username: String,
}

#[async_trait]
pub trait ApprovalRepository: Send + Sync {
    /// Find approval request by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ApprovalRequest>>;

    /// Find the approval request for a command
    async fn find_by_command(&self, command_id: i64) -> RepoResult<Option<ApprovalRequest>>;

    /// List pending requests, newest first, joined with command and requester
    async fn list_pending(&self, limit: i64, offset: i64) -> RepoResult<Vec<PendingApproval>>;

    /// Count requests grouped by review status
    async fn count_by_status(&self) -> RepoResult<Vec<(ApprovalStatus, i64)>>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

/// An audit entry joined with the actor's username
#[derive(Debug, Clone)]
pub struct AuditLogView {
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub action: AuditAction,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// Filter options for audit log queries
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub user_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// List audit entries matching the query, newest first
    async fn list(&self, query: AuditQuery) -> RepoResult<Vec<AuditLogView>>;

    /// Total number of audit entries
    async fn count(&self) -> RepoResult<i64>;
}
