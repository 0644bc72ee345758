//! Rule database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the rules table
#[derive(Debug, Clone, FromRow)]
pub struct RuleModel {
    pub id: i64,
    pub pattern: String,
    pub action: String,
    pub description: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
}
