//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input also
//! implement `Validate`.

use gate_core::entities::{RuleAction, UserRole};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Command Requests
// ============================================================================

/// Command submission request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitCommandRequest {
    #[validate(length(min = 1, max = 1000, message = "Command must be 1-1000 characters"))]
    pub command_text: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Create user request (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Member
}

/// Set a user's credit balance (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCreditsRequest {
    #[validate(range(min = 0, message = "Credits cannot be negative"))]
    pub credits: i64,
}

// ============================================================================
// Rule Requests
// ============================================================================

/// Create rule request (admin only)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 500, message = "Pattern must be 1-500 characters"))]
    pub pattern: String,

    pub action: RuleAction,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    0
}

/// Update rule request (admin only); absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRuleRequest {
    #[validate(length(min = 1, max = 500, message = "Pattern must be 1-500 characters"))]
    pub pattern: Option<String>,

    pub action: Option<RuleAction>,

    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    pub priority: Option<i32>,
}

// ============================================================================
// Approval Requests
// ============================================================================

/// Review decision for a pending approval request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approve,
    Reject,
}

/// Review a pending approval request (admin only)
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewApprovalRequest {
    pub action: ReviewDecision,

    /// Optional rejection reason, surfaced in the command result
    pub reason: Option<String>,
}
