//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    COUNTER.fetch_add(1, Ordering::SeqCst) * 1_000_000_000 + nanos
}

/// Create user request
#[derive(Debug, Serialize)]
pub struct CreateUserBody {
    pub username: String,
    pub role: String,
}

impl CreateUserBody {
    pub fn unique_member() -> Self {
        Self {
            username: format!("testuser{}", unique_suffix()),
            role: "member".to_string(),
        }
    }
}

/// Command submission request
#[derive(Debug, Serialize)]
pub struct SubmitCommandBody {
    pub command_text: String,
}

impl SubmitCommandBody {
    pub fn new(text: &str) -> Self {
        Self {
            command_text: text.to_string(),
        }
    }
}

/// Rule creation request
#[derive(Debug, Serialize)]
pub struct CreateRuleBody {
    pub pattern: String,
    pub action: String,
    pub description: Option<String>,
    pub priority: i32,
}

/// Credits update request
#[derive(Debug, Serialize)]
pub struct UpdateCreditsBody {
    pub credits: i64,
}

/// Approval review request
#[derive(Debug, Serialize)]
pub struct ReviewBody {
    pub action: String,
    pub reason: Option<String>,
}

/// User response
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub username: String,
    pub role: String,
    pub credits: i64,
    pub created_at: String,
}

/// User creation response (includes the one-time API key)
#[derive(Debug, Deserialize)]
pub struct CreatedUserBody {
    pub id: String,
    pub username: String,
    pub role: String,
    pub credits: i64,
    pub api_key: String,
}

/// User stats response
#[derive(Debug, Deserialize)]
pub struct UserStatsBody {
    pub credits: i64,
    pub total_commands: i64,
    pub executed_commands: i64,
    pub rejected_commands: i64,
}

/// Command response
#[derive(Debug, Deserialize)]
pub struct CommandBody {
    pub id: String,
    pub command_text: String,
    pub status: String,
    pub rule_id: Option<String>,
    pub credits_deducted: i64,
    pub result: Option<String>,
}

/// Rule response
#[derive(Debug, Deserialize)]
pub struct RuleBody {
    pub id: String,
    pub pattern: String,
    pub action: String,
    pub description: Option<String>,
    pub priority: i32,
}

/// Approval queue entry
#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub id: String,
    pub command_id: String,
    pub command_text: String,
    pub requester_username: String,
    pub status: String,
}

/// Review outcome response
#[derive(Debug, Deserialize)]
pub struct ReviewOutcomeBody {
    pub message: String,
    pub command_id: String,
    pub status: String,
}

/// Audit log entry
#[derive(Debug, Deserialize)]
pub struct AuditEntryBody {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub action: String,
    pub details: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
