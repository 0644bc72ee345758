//! AuditLogEntry entity - immutable record of a state-changing decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of audited action.
///
/// Approval-driven executions are attributable: `CommandApproved` is written
/// by the reviewing admin, distinct from the `CommandExecuted` entry written
/// for the command owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CommandExecuted,
    CommandRejected,
    CommandPendingApproval,
    CommandApproved,
    CommandRejectedByAdmin,
    UserCreated,
    CreditsUpdated,
    RuleCreated,
    RuleUpdated,
    RuleDeleted,
}

impl AuditAction {
    /// Stable string form used in storage and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommandExecuted => "COMMAND_EXECUTED",
            Self::CommandRejected => "COMMAND_REJECTED",
            Self::CommandPendingApproval => "COMMAND_PENDING_APPROVAL",
            Self::CommandApproved => "COMMAND_APPROVED",
            Self::CommandRejectedByAdmin => "COMMAND_REJECTED_BY_ADMIN",
            Self::UserCreated => "USER_CREATED",
            Self::CreditsUpdated => "CREDITS_UPDATED",
            Self::RuleCreated => "RULE_CREATED",
            Self::RuleUpdated => "RULE_UPDATED",
            Self::RuleDeleted => "RULE_DELETED",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMMAND_EXECUTED" => Ok(Self::CommandExecuted),
            "COMMAND_REJECTED" => Ok(Self::CommandRejected),
            "COMMAND_PENDING_APPROVAL" => Ok(Self::CommandPendingApproval),
            "COMMAND_APPROVED" => Ok(Self::CommandApproved),
            "COMMAND_REJECTED_BY_ADMIN" => Ok(Self::CommandRejectedByAdmin),
            "USER_CREATED" => Ok(Self::UserCreated),
            "CREDITS_UPDATED" => Ok(Self::CreditsUpdated),
            "RULE_CREATED" => Ok(Self::RuleCreated),
            "RULE_UPDATED" => Ok(Self::RuleUpdated),
            "RULE_DELETED" => Ok(Self::RuleDeleted),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

/// AuditLogEntry entity. Append-only, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: i64,
    /// Actor responsible for the transition (not necessarily the command owner)
    pub user_id: i64,
    pub action: AuditAction,
    /// Structured detail, serialized JSON
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Create an audit entry with structured details
    pub fn new(id: i64, user_id: i64, action: AuditAction, details: serde_json::Value) -> Self {
        Self {
            id,
            user_id,
            action,
            details: details.to_string(),
            timestamp: Utc::now(),
        }
    }
}
