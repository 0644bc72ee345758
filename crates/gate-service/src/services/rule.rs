//! Rule service - CRUD over the admission rule set
//!
//! Patterns are compiled at write time so a broken regex never reaches the
//! matcher. Overlapping patterns are reported in the log but never block a
//! write; ordering disputes are the operator's to resolve via priorities.

use gate_core::entities::{AuditAction, AuditLogEntry, Rule, User};
use gate_core::traits::{WriteBatch, WriteOp};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{CreateRuleRequest, RuleResponse, UpdateRuleRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::matcher;

/// Rule service
pub struct RuleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleService<'a> {
    /// Create a new RuleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a rule (admin only)
    #[instrument(skip(self, request), fields(admin_id = admin.id))]
    pub async fn create(
        &self,
        admin: &User,
        request: CreateRuleRequest,
    ) -> ServiceResult<RuleResponse> {
        matcher::validate_pattern(&request.pattern)?;

        let existing = self.ctx.rule_repo().list_ordered().await?;
        for conflict in matcher::find_conflicts(&existing, &request.pattern, None) {
            warn!(
                rule_id = conflict.id,
                pattern = %conflict.pattern,
                "new rule duplicates an existing pattern"
            );
        }

        let rule = Rule::new(
            self.ctx.next_id(),
            request.pattern,
            request.action,
            request.description,
            request.priority,
            Some(admin.id),
        );

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::InsertRule(rule.clone()));
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            admin.id,
            AuditAction::RuleCreated,
            json!({
                "rule_id": rule.id,
                "pattern": rule.pattern,
                "action": rule.action.as_str(),
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(rule_id = rule.id, "rule created");
        Ok(RuleResponse::from(&rule))
    }

    /// List all rules in evaluation order
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<RuleResponse>> {
        let rules = self.ctx.rule_repo().list_ordered().await?;
        Ok(rules.iter().map(RuleResponse::from).collect())
    }

    /// Get a rule by id
    #[instrument(skip(self))]
    pub async fn get(&self, rule_id: i64) -> ServiceResult<RuleResponse> {
        let rule = self
            .ctx
            .rule_repo()
            .find_by_id(rule_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Rule", rule_id.to_string()))?;

        Ok(RuleResponse::from(&rule))
    }

    /// Update a rule (admin only); absent fields are left unchanged
    #[instrument(skip(self, request), fields(admin_id = admin.id))]
    pub async fn update(
        &self,
        admin: &User,
        rule_id: i64,
        request: UpdateRuleRequest,
    ) -> ServiceResult<RuleResponse> {
        let mut rule = self
            .ctx
            .rule_repo()
            .find_by_id(rule_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Rule", rule_id.to_string()))?;

        if let Some(pattern) = request.pattern {
            matcher::validate_pattern(&pattern)?;

            let existing = self.ctx.rule_repo().list_ordered().await?;
            for conflict in matcher::find_conflicts(&existing, &pattern, Some(rule_id)) {
                warn!(
                    rule_id = conflict.id,
                    pattern = %conflict.pattern,
                    "updated rule duplicates an existing pattern"
                );
            }
            rule.pattern = pattern;
        }
        if let Some(action) = request.action {
            rule.action = action;
        }
        if let Some(description) = request.description {
            rule.description = Some(description);
        }
        if let Some(priority) = request.priority {
            rule.priority = priority;
        }

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::UpdateRule(rule.clone()));
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            admin.id,
            AuditAction::RuleUpdated,
            json!({
                "rule_id": rule.id,
                "pattern": rule.pattern,
                "action": rule.action.as_str(),
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(rule_id = rule.id, "rule updated");
        Ok(RuleResponse::from(&rule))
    }

    /// Delete a rule (admin only). Commands that matched it keep their
    /// history; their rule reference is cleared.
    #[instrument(skip(self), fields(admin_id = admin.id))]
    pub async fn delete(&self, admin: &User, rule_id: i64) -> ServiceResult<()> {
        let rule = self
            .ctx
            .rule_repo()
            .find_by_id(rule_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Rule", rule_id.to_string()))?;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::DeleteRule { rule_id: rule.id });
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            admin.id,
            AuditAction::RuleDeleted,
            json!({
                "rule_id": rule.id,
                "pattern": rule.pattern,
                "action": rule.action.as_str(),
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(rule_id = rule.id, "rule deleted");
        Ok(())
    }
}
