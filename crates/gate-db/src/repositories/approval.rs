//! PostgreSQL implementation of ApprovalRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gate_core::entities::{ApprovalRequest, ApprovalStatus};
use gate_core::traits::{ApprovalRepository, PendingApproval, RepoResult};
use gate_core::DomainError;

use crate::models::{ApprovalModel, PendingApprovalModel};

use super::error::map_db_error;

const APPROVAL_COLUMNS: &str =
    "id, command_id, requested_by, status, reviewed_by, created_at, reviewed_at";

/// PostgreSQL implementation of ApprovalRepository
#[derive(Clone)]
pub struct PgApprovalRepository {
    pool: PgPool,
}

impl PgApprovalRepository {
    /// Create a new PgApprovalRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalRepository for PgApprovalRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ApprovalRequest>> {
        let result = sqlx::query_as::<_, ApprovalModel>(&format!(
            "SELECT {APPROVAL_COLUMNS} FROM approval_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ApprovalRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_command(&self, command_id: i64) -> RepoResult<Option<ApprovalRequest>> {
        let result = sqlx::query_as::<_, ApprovalModel>(&format!(
            "SELECT {APPROVAL_COLUMNS} FROM approval_requests WHERE command_id = $1"
        ))
        .bind(command_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ApprovalRequest::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_pending(&self, limit: i64, offset: i64) -> RepoResult<Vec<PendingApproval>> {
        let rows = sqlx::query_as::<_, PendingApprovalModel>(
            "SELECT a.id, a.command_id, a.requested_by, a.status, a.reviewed_by, \
                    a.created_at, a.reviewed_at, \
                    c.command_text, u.username AS requested_by_username \
             FROM approval_requests a \
             JOIN commands c ON c.id = a.command_id \
             JOIN users u ON u.id = a.requested_by \
             WHERE a.status = 'pending' \
             ORDER BY a.created_at DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(PendingApproval::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self) -> RepoResult<Vec<(ApprovalStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM approval_requests GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(status, count)| {
                status
                    .parse::<ApprovalStatus>()
                    .map(|s| (s, count))
                    .map_err(|_| {
                        DomainError::DatabaseError(format!(
                            "invalid approval_requests.status value: {status}"
                        ))
                    })
            })
            .collect()
    }
}
