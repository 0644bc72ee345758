//! Approval service - the admin review workflow
//!
//! Pending approval requests are reviewed by admins. An approval stages the
//! same execution step as the admission pipeline, so a requester whose
//! balance ran dry between submission and review keeps the request pending.

use chrono::Utc;
use gate_core::entities::{AuditAction, AuditLogEntry, User};
use gate_core::traits::{WriteBatch, WriteOp};
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{ApprovalResponse, ReviewApprovalRequest, ReviewDecision, ReviewOutcomeResponse};

use super::command::stage_execution;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_LIMIT: i64 = 50;

/// Approval service
pub struct ApprovalService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApprovalService<'a> {
    /// Create a new ApprovalService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List pending approval requests for the admin review queue
    #[instrument(skip(self))]
    pub async fn list_pending(&self, limit: Option<i64>) -> ServiceResult<Vec<ApprovalResponse>> {
        let pending = self
            .ctx
            .approval_repo()
            .list_pending(limit.unwrap_or(DEFAULT_LIMIT), 0)
            .await?;

        Ok(pending.iter().map(ApprovalResponse::from).collect())
    }

    /// Review a pending approval request.
    ///
    /// An already-reviewed request is indistinguishable from a missing one
    /// for the caller: only pending requests are reviewable.
    #[instrument(skip(self, request), fields(reviewer_id = reviewer.id, approval_id))]
    pub async fn review(
        &self,
        reviewer: &User,
        approval_id: i64,
        request: ReviewApprovalRequest,
    ) -> ServiceResult<ReviewOutcomeResponse> {
        let approval = self
            .ctx
            .approval_repo()
            .find_by_id(approval_id)
            .await?
            .filter(|a| a.is_pending())
            .ok_or_else(|| ServiceError::not_found("Approval request", approval_id.to_string()))?;

        let mut command = self
            .ctx
            .command_repo()
            .find_by_id(approval.command_id)
            .await?
            .ok_or_else(|| {
                ServiceError::internal(format!(
                    "approval {} references missing command {}",
                    approval.id, approval.command_id
                ))
            })?;

        let requester = self
            .ctx
            .user_repo()
            .find_by_id(approval.requested_by)
            .await?;
        let requester_name = requester
            .map(|u| u.username)
            .unwrap_or_else(|| "Unknown".to_string());

        let now = Utc::now();
        let mut approval = approval;
        let mut batch = WriteBatch::new();

        match request.action {
            ReviewDecision::Approve => {
                approval.approve(reviewer.id, now);
                batch.push(WriteOp::UpdateApproval(approval.clone()));

                // Executes the command and deducts the requester's credit;
                // an empty balance fails the whole batch and leaves the
                // request pending
                stage_execution(self.ctx, &mut batch, &mut command);

                batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
                    self.ctx.next_id(),
                    reviewer.id,
                    AuditAction::CommandApproved,
                    json!({
                        "approval_id": approval.id,
                        "command_id": command.id,
                        "command_text": command.command_text,
                        "requester": requester_name,
                    }),
                )));
                self.ctx.unit_of_work().commit(batch).await?;

                info!(approval_id = approval.id, command_id = command.id, "command approved");
                Ok(ReviewOutcomeResponse {
                    message: "Command approved and executed".to_string(),
                    command_id: command.id.to_string(),
                    status: command.status,
                })
            }

            ReviewDecision::Reject => {
                approval.reject(reviewer.id, now);
                let reason = request
                    .reason
                    .clone()
                    .unwrap_or_else(|| "No reason provided".to_string());
                command.reject(format!("Rejected by admin: {reason}"));

                batch.push(WriteOp::UpdateApproval(approval.clone()));
                batch.push(WriteOp::UpdateCommand(command.clone()));
                batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
                    self.ctx.next_id(),
                    reviewer.id,
                    AuditAction::CommandRejectedByAdmin,
                    json!({
                        "approval_id": approval.id,
                        "command_id": command.id,
                        "command_text": command.command_text,
                        "requester": requester_name,
                        "reason": reason,
                    }),
                )));
                self.ctx.unit_of_work().commit(batch).await?;

                info!(approval_id = approval.id, command_id = command.id, "command rejected by admin");
                Ok(ReviewOutcomeResponse {
                    message: "Command rejected".to_string(),
                    command_id: command.id.to_string(),
                    status: command.status,
                })
            }
        }
    }
}
