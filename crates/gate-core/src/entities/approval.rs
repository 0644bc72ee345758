//! ApprovalRequest entity - tracks a command parked for admin review

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review state of an approval request.
///
/// `pending → approved` and `pending → rejected` are the only transitions;
/// both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Stable string form used in storage and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown approval status: {other}")),
        }
    }
}

/// ApprovalRequest entity, 1:1 with a `PendingApproval` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovalRequest {
    pub id: i64,
    pub command_id: i64,
    pub requested_by: i64,
    pub status: ApprovalStatus,
    pub reviewed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ApprovalRequest {
    /// Create a pending approval request for a command
    pub fn new(id: i64, command_id: i64, requested_by: i64) -> Self {
        Self {
            id,
            command_id,
            requested_by,
            status: ApprovalStatus::Pending,
            reviewed_by: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApprovalStatus::Pending
    }

    /// Record an approval decision
    pub fn approve(&mut self, reviewer_id: i64, now: DateTime<Utc>) {
        self.status = ApprovalStatus::Approved;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(now);
    }

    /// Record a rejection decision
    pub fn reject(&mut self, reviewer_id: i64, now: DateTime<Utc>) {
        self.status = ApprovalStatus::Rejected;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(now);
    }
}
