//! Seed service - bootstrap data for a fresh deployment
//!
//! Idempotent: the admin account is only created when no user with the
//! configured username exists, and the default rule set is only installed
//! into an empty rules table.

use gate_common::{generate_api_key, SeedConfig};
use gate_core::entities::{Rule, RuleAction, User, UserRole};
use gate_core::traits::{WriteBatch, WriteOp};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What the seeding pass did
#[derive(Debug)]
pub struct SeedOutcome {
    /// The admin's API key, present whether the account was created now or
    /// already existed, so operators can always recover it from the seed run
    pub admin_api_key: String,
    pub admin_created: bool,
    pub rules_created: usize,
}

/// Built-in rule set installed on first boot: block well-known destructive
/// commands outright, fast-path obviously read-only ones
fn default_rules() -> Vec<(&'static str, RuleAction, &'static str, i32)> {
    vec![
        (
            r":\(\)\{ :\|:& \};:",
            RuleAction::AutoReject,
            "Fork bomb - dangerous recursive process",
            0,
        ),
        (
            r"rm\s+-rf\s+/",
            RuleAction::AutoReject,
            "Delete root directory - extremely dangerous",
            0,
        ),
        (r"mkfs\.", RuleAction::AutoReject, "Format filesystem - data loss", 0),
        (
            r"dd\s+if=/dev/(zero|random)\s+of=/dev/",
            RuleAction::AutoReject,
            "Overwrite disk - data loss",
            0,
        ),
        (
            r"chmod\s+-R\s+777\s+/",
            RuleAction::AutoReject,
            "Make all files world-writable - security risk",
            0,
        ),
        (
            r"git\s+(status|log|diff|branch|show)",
            RuleAction::AutoAccept,
            "Safe git read operations",
            1,
        ),
        (
            r"^(ls|cat|pwd|echo|which|whoami|date|uptime)",
            RuleAction::AutoAccept,
            "Safe basic commands",
            1,
        ),
        (r"^grep\s+", RuleAction::AutoAccept, "Text search - safe", 1),
        (r"^find\s+", RuleAction::AutoAccept, "File search - safe", 1),
    ]
}

/// Seed service
pub struct SeedService<'a> {
    ctx: &'a ServiceContext,
    config: SeedConfig,
}

impl<'a> SeedService<'a> {
    /// Create a new SeedService
    pub fn new(ctx: &'a ServiceContext, config: SeedConfig) -> Self {
        Self { ctx, config }
    }

    /// Run the seeding pass
    #[instrument(skip(self))]
    pub async fn run(&self) -> ServiceResult<SeedOutcome> {
        let (admin, admin_created) = self.ensure_admin().await?;
        let rules_created = self.ensure_rules(admin.id).await?;

        Ok(SeedOutcome {
            admin_api_key: admin.api_key,
            admin_created,
            rules_created,
        })
    }

    async fn ensure_admin(&self) -> ServiceResult<(User, bool)> {
        if let Some(existing) = self
            .ctx
            .user_repo()
            .find_by_username(&self.config.admin_username)
            .await?
        {
            info!(username = %existing.username, "admin user already exists");
            return Ok((existing, false));
        }

        let mut admin = User::new(
            self.ctx.next_id(),
            self.config.admin_username.clone(),
            generate_api_key(),
            UserRole::Admin,
        );
        admin.credits = self.config.admin_credits;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::InsertUser(admin.clone()));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(username = %admin.username, credits = admin.credits, "created admin user");
        Ok((admin, true))
    }

    async fn ensure_rules(&self, admin_id: i64) -> ServiceResult<usize> {
        let existing = self.ctx.rule_repo().count().await?;
        if existing > 0 {
            info!(count = existing, "rules already exist");
            return Ok(0);
        }

        let defaults = default_rules();
        let mut batch = WriteBatch::new();
        for (pattern, action, description, priority) in &defaults {
            batch.push(WriteOp::InsertRule(Rule::new(
                self.ctx.next_id(),
                (*pattern).to_string(),
                *action,
                Some((*description).to_string()),
                *priority,
                Some(admin_id),
            )));
        }
        self.ctx.unit_of_work().commit(batch).await?;

        info!(count = defaults.len(), "installed default rules");
        Ok(defaults.len())
    }
}
