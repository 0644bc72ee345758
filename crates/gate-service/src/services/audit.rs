//! Audit service - read access to the append-only trail

use gate_core::traits::AuditQuery;
use tracing::instrument;

use crate::dto::AuditLogResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_LIMIT: i64 = 100;

/// Audit service
pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    /// Create a new AuditService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List audit entries, newest first (admin only)
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<i64>) -> ServiceResult<Vec<AuditLogResponse>> {
        let entries = self
            .ctx
            .audit_repo()
            .list(AuditQuery {
                user_id: None,
                action: None,
                limit: limit.unwrap_or(DEFAULT_LIMIT),
                offset: 0,
            })
            .await?;

        Ok(entries.iter().map(AuditLogResponse::from).collect())
    }

    /// List one user's audit entries (admin only); errors when the user
    /// does not exist so a typo'd id is distinguishable from an empty trail
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        user_id: i64,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<AuditLogResponse>> {
        let user = self.ctx.user_repo().find_by_id(user_id).await?;
        if user.is_none() {
            return Err(ServiceError::not_found("User", user_id.to_string()));
        }

        let entries = self
            .ctx
            .audit_repo()
            .list(AuditQuery {
                user_id: Some(user_id),
                action: None,
                limit: limit.unwrap_or(DEFAULT_LIMIT),
                offset: 0,
            })
            .await?;

        Ok(entries.iter().map(AuditLogResponse::from).collect())
    }
}
