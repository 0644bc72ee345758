//! User entity - an authenticated principal with a credit budget

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Credits granted to a freshly created user.
pub const DEFAULT_CREDITS: i64 = 100;

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    /// Stable string form used in storage and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown user role: {other}")),
        }
    }
}

/// User entity
///
/// Credits are only mutated through the unit of work: either the execution
/// step's atomic deduction or an admin override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub api_key: String,
    pub role: UserRole,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the default credit budget
    pub fn new(id: i64, username: String, api_key: String, role: UserRole) -> Self {
        Self {
            id,
            username,
            api_key,
            role,
            credits: DEFAULT_CREDITS,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether the user can afford another execution
    #[inline]
    pub fn has_credits(&self) -> bool {
        self.credits > 0
    }
}
