//! Command database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the commands table
#[derive(Debug, Clone, FromRow)]
pub struct CommandModel {
    pub id: i64,
    pub command_text: String,
    pub status: String,
    pub user_id: i64,
    pub rule_id: Option<i64>,
    pub credits_deducted: i64,
    pub result: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
}
