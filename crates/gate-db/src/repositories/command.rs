//! PostgreSQL implementation of CommandRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gate_core::entities::{Command, CommandStatus};
use gate_core::traits::{CommandQuery, CommandRepository, RepoResult};
use gate_core::DomainError;

use crate::models::CommandModel;

use super::error::map_db_error;

const COMMAND_COLUMNS: &str = "id, command_text, status, user_id, rule_id, credits_deducted, \
                               result, submitted_at, executed_at";

/// PostgreSQL implementation of CommandRepository
#[derive(Clone)]
pub struct PgCommandRepository {
    pool: PgPool,
}

impl PgCommandRepository {
    /// Create a new PgCommandRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommandRepository for PgCommandRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Command>> {
        let result = sqlx::query_as::<_, CommandModel>(&format!(
            "SELECT {COMMAND_COLUMNS} FROM commands WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Command::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: CommandQuery) -> RepoResult<Vec<Command>> {
        // Optional filters collapse to always-true predicates when unset
        let rows = sqlx::query_as::<_, CommandModel>(&format!(
            "SELECT {COMMAND_COLUMNS} FROM commands \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
               AND ($2::VARCHAR IS NULL OR status = $2) \
             ORDER BY submitted_at DESC \
             LIMIT $3 OFFSET $4"
        ))
        .bind(query.user_id)
        .bind(query.status.map(CommandStatus::as_str))
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Command::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count_by_status(&self, user_id: Option<i64>) -> RepoResult<Vec<(CommandStatus, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM commands \
             WHERE ($1::BIGINT IS NULL OR user_id = $1) \
             GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(status, count)| {
                status
                    .parse::<CommandStatus>()
                    .map(|s| (s, count))
                    .map_err(|_| {
                        DomainError::DatabaseError(format!("invalid commands.status value: {status}"))
                    })
            })
            .collect()
    }
}
