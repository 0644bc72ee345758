//! Rule entity - a pattern/action pair evaluated by the matcher

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What happens when a rule's pattern matches a submitted command.
///
/// This is a closed set: the admission pipeline matches on it exhaustively,
/// so adding a variant forces every dispatch site to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleAction {
    AutoAccept,
    AutoReject,
    RequireApproval,
}

impl RuleAction {
    /// Stable string form used in storage and API payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoAccept => "AUTO_ACCEPT",
            Self::AutoReject => "AUTO_REJECT",
            Self::RequireApproval => "REQUIRE_APPROVAL",
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AUTO_ACCEPT" => Ok(Self::AutoAccept),
            "AUTO_REJECT" => Ok(Self::AutoReject),
            "REQUIRE_APPROVAL" => Ok(Self::RequireApproval),
            other => Err(format!("unknown rule action: {other}")),
        }
    }
}

/// Rule entity
///
/// Rules form a total order by (priority, id): lower priority values are
/// evaluated first, ties broken by id ascending (creation order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub id: i64,
    pub pattern: String,
    pub action: RuleAction,
    pub description: Option<String>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<i64>,
}

impl Rule {
    /// Create a new Rule
    pub fn new(
        id: i64,
        pattern: String,
        action: RuleAction,
        description: Option<String>,
        priority: i32,
        created_by: Option<i64>,
    ) -> Self {
        Self {
            id,
            pattern,
            action,
            description,
            priority,
            created_at: Utc::now(),
            created_by,
        }
    }

    /// Evaluation order key: priority ascending, then id ascending
    #[inline]
    pub fn order_key(&self) -> (i32, i64) {
        (self.priority, self.id)
    }

    /// Human-readable label for rejection results: description if present,
    /// otherwise the raw pattern
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.pattern)
    }
}
