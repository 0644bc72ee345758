//! PostgreSQL implementation of RuleRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gate_core::entities::Rule;
use gate_core::traits::{RepoResult, RuleRepository};

use crate::models::RuleModel;

use super::error::map_db_error;

const RULE_COLUMNS: &str = "id, pattern, action, description, priority, created_at, created_by";

/// PostgreSQL implementation of RuleRepository
#[derive(Clone)]
pub struct PgRuleRepository {
    pool: PgPool,
}

impl PgRuleRepository {
    /// Create a new PgRuleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleRepository for PgRuleRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Rule>> {
        let result = sqlx::query_as::<_, RuleModel>(&format!(
            "SELECT {RULE_COLUMNS} FROM rules WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Rule::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_ordered(&self) -> RepoResult<Vec<Rule>> {
        let rows = sqlx::query_as::<_, RuleModel>(&format!(
            "SELECT {RULE_COLUMNS} FROM rules ORDER BY priority ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Rule::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rules")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
