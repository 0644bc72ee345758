//! Audit log entity <-> model mappers

use gate_core::entities::{AuditAction, AuditLogEntry};
use gate_core::traits::AuditLogView;
use gate_core::DomainError;

use crate::models::{AuditLogModel, AuditLogViewModel};

use super::bad_column;

impl TryFrom<AuditLogModel> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<AuditAction>()
            .map_err(|_| bad_column("audit_logs", "action", &model.action))?;

        Ok(AuditLogEntry {
            id: model.id,
            user_id: model.user_id,
            action,
            details: model.details,
            timestamp: model.timestamp,
        })
    }
}

impl TryFrom<AuditLogViewModel> for AuditLogView {
    type Error = DomainError;

    fn try_from(model: AuditLogViewModel) -> Result<Self, Self::Error> {
        let action = model
            .action
            .parse::<AuditAction>()
            .map_err(|_| bad_column("audit_logs", "action", &model.action))?;

        Ok(AuditLogView {
            id: model.id,
            user_id: model.user_id,
            username: model.username,
            action,
            details: model.details,
            timestamp: model.timestamp,
        })
    }
}
