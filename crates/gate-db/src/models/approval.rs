//! Approval request database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the approval_requests table
#[derive(Debug, Clone, FromRow)]
pub struct ApprovalModel {
    pub id: i64,
    pub command_id: i64,
    pub requested_by: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Pending request joined with its command text and requester username
#[derive(Debug, Clone, FromRow)]
pub struct PendingApprovalModel {
    pub id: i64,
    pub command_id: i64,
    pub requested_by: i64,
    pub status: String,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub command_text: String,
    pub requested_by_username: String,
}
