//! Command service - the admission pipeline
//!
//! Every submitted command flows through validate → credit check → rule
//! match → dispatch. Each outcome is persisted as one atomic write batch
//! carrying the command record and its audit trail together.

use chrono::Utc;
use gate_core::entities::{AuditAction, AuditLogEntry, Command, RuleAction, User};
use gate_core::traits::{CommandQuery, WriteBatch, WriteOp};
use gate_core::{validate_command, DomainError};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{CommandResponse, SubmitCommandRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::matcher;

/// Default page size for command history
const DEFAULT_LIMIT: i64 = 50;

/// Command service
pub struct CommandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommandService<'a> {
    /// Create a new CommandService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit a command for admission.
    ///
    /// Returns the persisted command record for every decided outcome,
    /// including rejections; only pre-admission failures (no credits, storage
    /// errors) surface as errors.
    #[instrument(skip(self, request), fields(user_id = user.id))]
    pub async fn submit(
        &self,
        user: &User,
        request: SubmitCommandRequest,
    ) -> ServiceResult<CommandResponse> {
        // Syntactic validation happens before anything else; failures are
        // recorded as rejected commands, not API errors
        if let Err(reason) = validate_command(&request.command_text) {
            return self.reject_invalid(user, request.command_text, &reason).await;
        }

        // Submission-time gate on the cached balance; the execution step
        // re-checks atomically at deduction time
        if !user.has_credits() {
            return Err(ServiceError::from(DomainError::InsufficientCredits));
        }

        // Rules are re-read on every admission so changes apply immediately
        let rules = self.ctx.rule_repo().list_ordered().await?;
        let matched = matcher::first_match(&rules, &request.command_text);

        let mut command = Command::new(
            self.ctx.next_id(),
            request.command_text,
            user.id,
            matched.map(|r| r.id),
        );

        match matched.map(|r| r.action) {
            Some(RuleAction::AutoReject) => {
                // matched is always Some on this branch
                let rule = matched.ok_or_else(|| ServiceError::internal("rule vanished"))?;
                command.reject(format!("Command rejected by rule: {}", rule.label()));

                let mut batch = WriteBatch::new();
                batch.push(WriteOp::InsertCommand(command.clone()));
                batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
                    self.ctx.next_id(),
                    user.id,
                    AuditAction::CommandRejected,
                    json!({
                        "command_id": command.id,
                        "command_text": command.command_text,
                        "rule_id": rule.id,
                        "reason": "AUTO_REJECT",
                    }),
                )));
                self.ctx.unit_of_work().commit(batch).await?;

                info!(command_id = command.id, rule_id = rule.id, "command auto-rejected");
                Ok(CommandResponse::from(&command))
            }

            Some(RuleAction::RequireApproval) => {
                let rule = matched.ok_or_else(|| ServiceError::internal("rule vanished"))?;
                command.park_for_approval();
                let approval = gate_core::entities::ApprovalRequest::new(
                    self.ctx.next_id(),
                    command.id,
                    user.id,
                );

                let mut batch = WriteBatch::new();
                batch.push(WriteOp::InsertCommand(command.clone()));
                batch.push(WriteOp::InsertApproval(approval));
                batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
                    self.ctx.next_id(),
                    user.id,
                    AuditAction::CommandPendingApproval,
                    json!({
                        "command_id": command.id,
                        "command_text": command.command_text,
                        "rule_id": rule.id,
                    }),
                )));
                self.ctx.unit_of_work().commit(batch).await?;

                info!(command_id = command.id, rule_id = rule.id, "command parked for approval");
                Ok(CommandResponse::from(&command))
            }

            // AutoAccept, or no rule matched (default accept)
            Some(RuleAction::AutoAccept) | None => {
                let mut batch = WriteBatch::new();
                batch.push(WriteOp::InsertCommand(command.clone()));
                stage_execution(self.ctx, &mut batch, &mut command);
                self.ctx.unit_of_work().commit(batch).await?;

                info!(command_id = command.id, "command executed");
                Ok(CommandResponse::from(&command))
            }
        }
    }

    /// Persist a validation failure as a rejected command
    async fn reject_invalid(
        &self,
        user: &User,
        command_text: String,
        reason: &str,
    ) -> ServiceResult<CommandResponse> {
        let mut command = Command::new(self.ctx.next_id(), command_text, user.id, None);
        command.reject(format!("Invalid command: {reason}"));

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::InsertCommand(command.clone()));
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            user.id,
            AuditAction::CommandRejected,
            json!({
                "command_id": command.id,
                "command_text": command.command_text,
                "reason": format!("VALIDATION_ERROR: {reason}"),
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(command_id = command.id, reason, "command failed validation");
        Ok(CommandResponse::from(&command))
    }

    /// Get the calling user's command history, newest first
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn list(&self, user: &User, limit: Option<i64>) -> ServiceResult<Vec<CommandResponse>> {
        let commands = self
            .ctx
            .command_repo()
            .list(CommandQuery {
                user_id: Some(user.id),
                status: None,
                limit: limit.unwrap_or(DEFAULT_LIMIT),
                offset: 0,
            })
            .await?;

        Ok(commands.iter().map(CommandResponse::from).collect())
    }

    /// Get a single command owned by the calling user. Someone else's command
    /// is indistinguishable from a missing one; admins inspect activity
    /// through the audit trail instead.
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn get(&self, user: &User, command_id: i64) -> ServiceResult<CommandResponse> {
        let command = self
            .ctx
            .command_repo()
            .find_by_id(command_id)
            .await?
            .filter(|c| c.user_id == user.id)
            .ok_or_else(|| ServiceError::not_found("Command", command_id.to_string()))?;

        Ok(CommandResponse::from(&command))
    }
}

/// Stage the execution step onto a batch.
///
/// Shared by the admission pipeline and the approval workflow: marks the
/// command executed, deducts one credit from its owner (failing the batch
/// atomically when the balance is empty), and appends the COMMAND_EXECUTED
/// audit entry attributed to the owner. The caller commits.
pub(crate) fn stage_execution(ctx: &ServiceContext, batch: &mut WriteBatch, command: &mut Command) {
    command.mark_executed(Utc::now());

    batch.push(WriteOp::UpdateCommand(command.clone()));
    batch.push(WriteOp::DeductCredit {
        user_id: command.user_id,
    });
    batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
        ctx.next_id(),
        command.user_id,
        AuditAction::CommandExecuted,
        json!({
            "command_id": command.id,
            "command_text": command.command_text,
            "credits_deducted": 1,
        }),
    )));
}
