//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Entity IDs are
//! serialized as strings because they exceed JavaScript's safe integer range.

use chrono::{DateTime, Utc};
use gate_core::entities::{ApprovalStatus, AuditAction, CommandStatus, RuleAction, UserRole};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// User response (never includes the API key)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
}

/// Response to user creation; the only place the API key is ever returned
#[derive(Debug, Clone, Serialize)]
pub struct UserCreatedResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub credits: i64,
    pub created_at: DateTime<Utc>,
    pub api_key: String,
}

/// Per-user command statistics
#[derive(Debug, Clone, Serialize)]
pub struct UserStatsResponse {
    pub credits: i64,
    pub total_commands: i64,
    pub executed_commands: i64,
    pub rejected_commands: i64,
}

/// Response to a credits update
#[derive(Debug, Clone, Serialize)]
pub struct CreditsUpdatedResponse {
    pub message: String,
    pub new_credits: i64,
}

// ============================================================================
// Rule Responses
// ============================================================================

/// Rule response
#[derive(Debug, Clone, Serialize)]
pub struct RuleResponse {
    pub id: String,
    pub pattern: String,
    pub action: RuleAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

// ============================================================================
// Command Responses
// ============================================================================

/// Command response
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub id: String,
    pub command_text: String,
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    pub credits_deducted: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Approval Responses
// ============================================================================

/// Pending approval request, enriched for the admin review queue
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalResponse {
    pub id: String,
    pub command_id: String,
    pub command_text: String,
    pub requested_by: String,
    pub requester_username: String,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Outcome of an approval review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcomeResponse {
    pub message: String,
    pub command_id: String,
    pub status: CommandStatus,
}

// ============================================================================
// Audit Responses
// ============================================================================

/// Audit log entry with the actor's username joined in
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub action: AuditAction,
    /// Structured detail as a JSON string
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Per-dependency readiness checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
}

/// Readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}
