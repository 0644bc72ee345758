//! Audit log database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the audit_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

/// Audit entry joined with the actor's username
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogViewModel {
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub action: String,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}
