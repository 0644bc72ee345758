//! Approval request entity <-> model mappers

use gate_core::entities::{ApprovalRequest, ApprovalStatus};
use gate_core::traits::PendingApproval;
use gate_core::DomainError;

use crate::models::{ApprovalModel, PendingApprovalModel};

use super::bad_column;

impl TryFrom<ApprovalModel> for ApprovalRequest {
    type Error = DomainError;

    fn try_from(model: ApprovalModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<ApprovalStatus>()
            .map_err(|_| bad_column("approval_requests", "status", &model.status))?;

        Ok(ApprovalRequest {
            id: model.id,
            command_id: model.command_id,
            requested_by: model.requested_by,
            status,
            reviewed_by: model.reviewed_by,
            created_at: model.created_at,
            reviewed_at: model.reviewed_at,
        })
    }
}

impl TryFrom<PendingApprovalModel> for PendingApproval {
    type Error = DomainError;

    fn try_from(model: PendingApprovalModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse::<ApprovalStatus>()
            .map_err(|_| bad_column("approval_requests", "status", &model.status))?;

        Ok(PendingApproval {
            approval: ApprovalRequest {
                id: model.id,
                command_id: model.command_id,
                requested_by: model.requested_by,
                status,
                reviewed_by: model.reviewed_by,
                created_at: model.created_at,
                reviewed_at: model.reviewed_at,
            },
            command_text: model.command_text,
            requested_by_username: model.requested_by_username,
        })
    }
}
