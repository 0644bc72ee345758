//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub username: String,
    pub api_key: String,
    pub role: String,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
}
