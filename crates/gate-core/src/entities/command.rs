//! Command entity - a submitted command and its admission outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a submitted command.
///
/// `Accepted` is an interim marker given to a command record created just
/// before execution; every persisted command ends up in `Rejected`,
/// `Executed`, or `PendingApproval` (which later transitions to `Executed`
/// or `Rejected` through the approval workflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Accepted,
    Rejected,
    Executed,
    PendingApproval,
}

impl CommandStatus {
    /// Stable string form used in storage and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
            Self::PendingApproval => "pending_approval",
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "executed" => Ok(Self::Executed),
            "pending_approval" => Ok(Self::PendingApproval),
            other => Err(format!("unknown command status: {other}")),
        }
    }
}

/// Format the mock execution result for a command.
///
/// Execution is simulated: nothing is run, we only record what would happen.
pub fn format_execution_result(command_text: &str) -> String {
    format!("[MOCK] Command '{command_text}' would be executed with status: SUCCESS")
}

/// Command entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: i64,
    pub command_text: String,
    pub status: CommandStatus,
    pub user_id: i64,
    pub rule_id: Option<i64>,
    pub credits_deducted: i64,
    pub result: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub executed_at: Option<DateTime<Utc>>,
}

impl Command {
    /// Create a command record with the interim `Accepted` status
    pub fn new(id: i64, command_text: String, user_id: i64, rule_id: Option<i64>) -> Self {
        Self {
            id,
            command_text,
            status: CommandStatus::Accepted,
            user_id,
            rule_id,
            credits_deducted: 0,
            result: None,
            submitted_at: Utc::now(),
            executed_at: None,
        }
    }

    /// Mark the command rejected with a reason
    pub fn reject(&mut self, reason: impl Into<String>) {
        self.status = CommandStatus::Rejected;
        self.result = Some(reason.into());
    }

    /// Park the command for admin approval
    pub fn park_for_approval(&mut self) {
        self.status = CommandStatus::PendingApproval;
        self.result = Some("Command requires admin approval".to_string());
    }

    /// Record a successful (simulated) execution.
    ///
    /// The matching credit deduction is staged separately by the caller;
    /// `credits_deducted` here only records that one credit belongs to this
    /// command.
    pub fn mark_executed(&mut self, now: DateTime<Utc>) {
        self.status = CommandStatus::Executed;
        self.result = Some(format_execution_result(&self.command_text));
        self.credits_deducted = 1;
        self.executed_at = Some(now);
    }
}
