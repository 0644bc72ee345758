//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gate_core::entities::AuditAction;
use gate_core::traits::{AuditLogRepository, AuditLogView, AuditQuery, RepoResult};

use crate::models::AuditLogViewModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: AuditQuery) -> RepoResult<Vec<AuditLogView>> {
        let rows = sqlx::query_as::<_, AuditLogViewModel>(
            "SELECT a.id, a.user_id, u.username, a.action, a.details, a.timestamp \
             FROM audit_logs a \
             LEFT JOIN users u ON u.id = a.user_id \
             WHERE ($1::BIGINT IS NULL OR a.user_id = $1) \
               AND ($2::VARCHAR IS NULL OR a.action = $2) \
             ORDER BY a.timestamp DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(query.user_id)
        .bind(query.action.map(AuditAction::as_str))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(AuditLogView::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
