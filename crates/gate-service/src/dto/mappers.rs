//! Entity -> response DTO mappers

use gate_core::entities::{Command, Rule, User};
use gate_core::traits::{AuditLogView, PendingApproval};

use super::responses::{
    ApprovalResponse, AuditLogResponse, CommandResponse, RuleResponse, UserCreatedResponse,
    UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            credits: user.credits,
            created_at: user.created_at,
        }
    }
}

impl From<&User> for UserCreatedResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            credits: user.credits,
            created_at: user.created_at,
            api_key: user.api_key.clone(),
        }
    }
}

impl From<&Rule> for RuleResponse {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            pattern: rule.pattern.clone(),
            action: rule.action,
            description: rule.description.clone(),
            priority: rule.priority,
            created_at: rule.created_at,
            created_by: rule.created_by.map(|id| id.to_string()),
        }
    }
}

impl From<&Command> for CommandResponse {
    fn from(command: &Command) -> Self {
        Self {
            id: command.id.to_string(),
            command_text: command.command_text.clone(),
            status: command.status,
            rule_id: command.rule_id.map(|id| id.to_string()),
            credits_deducted: command.credits_deducted,
            result: command.result.clone(),
            submitted_at: command.submitted_at,
            executed_at: command.executed_at,
        }
    }
}

impl From<&PendingApproval> for ApprovalResponse {
    fn from(pending: &PendingApproval) -> Self {
        Self {
            id: pending.approval.id.to_string(),
            command_id: pending.approval.command_id.to_string(),
            command_text: pending.command_text.clone(),
            requested_by: pending.approval.requested_by.to_string(),
            requester_username: pending.requested_by_username.clone(),
            status: pending.approval.status,
            created_at: pending.approval.created_at,
            reviewed_by: pending.approval.reviewed_by.map(|id| id.to_string()),
            reviewed_at: pending.approval.reviewed_at,
        }
    }
}

impl From<&AuditLogView> for AuditLogResponse {
    fn from(view: &AuditLogView) -> Self {
        Self {
            id: view.id.to_string(),
            user_id: view.user_id.to_string(),
            username: view.username.clone().unwrap_or_else(|| "Unknown".to_string()),
            action: view.action,
            details: view.details.clone(),
            timestamp: view.timestamp,
        }
    }
}
