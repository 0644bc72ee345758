//! PostgreSQL implementation of the unit of work
//!
//! Applies a `WriteBatch` inside a single transaction. Any failing op rolls
//! back the whole batch, so an admission or review either lands completely
//! (command row, approval row, credit change, audit entries) or not at all.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use gate_core::entities::{ApprovalRequest, AuditLogEntry, Command, Rule, User};
use gate_core::traits::{UnitOfWork, WriteBatch, WriteOp};
use gate_core::DomainError;

use super::error::{
    approval_not_found, command_not_found, map_db_error, map_unique_violation, rule_not_found,
    user_not_found,
};

type Tx<'a> = Transaction<'a, Postgres>;

/// PostgreSQL implementation of UnitOfWork
#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    /// Create a new PgUnitOfWork
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip_all, fields(ops = batch.len()))]
    async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for op in batch.into_ops() {
            apply(&mut tx, op).await?;
        }

        tx.commit().await.map_err(map_db_error)
    }
}

async fn apply(tx: &mut Tx<'_>, op: WriteOp) -> Result<(), DomainError> {
    match op {
        WriteOp::InsertUser(user) => insert_user(tx, &user).await,
        WriteOp::SetUserCredits { user_id, credits } => {
            set_user_credits(tx, user_id, credits).await
        }
        WriteOp::DeductCredit { user_id } => deduct_credit(tx, user_id).await,
        WriteOp::InsertRule(rule) => insert_rule(tx, &rule).await,
        WriteOp::UpdateRule(rule) => update_rule(tx, &rule).await,
        WriteOp::DeleteRule { rule_id } => delete_rule(tx, rule_id).await,
        WriteOp::InsertCommand(command) => insert_command(tx, &command).await,
        WriteOp::UpdateCommand(command) => update_command(tx, &command).await,
        WriteOp::InsertApproval(approval) => insert_approval(tx, &approval).await,
        WriteOp::UpdateApproval(approval) => update_approval(tx, &approval).await,
        WriteOp::AppendAudit(entry) => append_audit(tx, &entry).await,
    }
}

async fn insert_user(tx: &mut Tx<'_>, user: &User) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO users (id, username, api_key, role, credits, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.api_key)
    .bind(user.role.as_str())
    .bind(user.credits)
    .bind(user.created_at)
    .execute(&mut **tx)
    .await
    .map_err(|e| map_unique_violation(e, || DomainError::UsernameAlreadyExists))?;

    Ok(())
}

async fn set_user_credits(tx: &mut Tx<'_>, user_id: i64, credits: i64) -> Result<(), DomainError> {
    let result = sqlx::query("UPDATE users SET credits = $2 WHERE id = $1")
        .bind(user_id)
        .bind(credits)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(user_not_found(user_id));
    }

    Ok(())
}

/// Conditional decrement; checking and spending in one statement means two
/// concurrent batches cannot both take the last credit.
async fn deduct_credit(tx: &mut Tx<'_>, user_id: i64) -> Result<(), DomainError> {
    let result = sqlx::query("UPDATE users SET credits = credits - 1 WHERE id = $1 AND credits > 0")
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::InsufficientCredits);
    }

    Ok(())
}

async fn insert_rule(tx: &mut Tx<'_>, rule: &Rule) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO rules (id, pattern, action, description, priority, created_at, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(rule.id)
    .bind(&rule.pattern)
    .bind(rule.action.as_str())
    .bind(&rule.description)
    .bind(rule.priority)
    .bind(rule.created_at)
    .bind(rule.created_by)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

async fn update_rule(tx: &mut Tx<'_>, rule: &Rule) -> Result<(), DomainError> {
    let result = sqlx::query(
        "UPDATE rules SET pattern = $2, action = $3, description = $4, priority = $5 \
         WHERE id = $1",
    )
    .bind(rule.id)
    .bind(&rule.pattern)
    .bind(rule.action.as_str())
    .bind(&rule.description)
    .bind(rule.priority)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(rule_not_found(rule.id));
    }

    Ok(())
}

async fn delete_rule(tx: &mut Tx<'_>, rule_id: i64) -> Result<(), DomainError> {
    // Keep history intact: commands that matched this rule drop the link
    sqlx::query("UPDATE commands SET rule_id = NULL WHERE rule_id = $1")
        .bind(rule_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    let result = sqlx::query("DELETE FROM rules WHERE id = $1")
        .bind(rule_id)
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(rule_not_found(rule_id));
    }

    Ok(())
}

async fn insert_command(tx: &mut Tx<'_>, command: &Command) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO commands (id, command_text, status, user_id, rule_id, credits_deducted, \
                               result, submitted_at, executed_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(command.id)
    .bind(&command.command_text)
    .bind(command.status.as_str())
    .bind(command.user_id)
    .bind(command.rule_id)
    .bind(command.credits_deducted)
    .bind(&command.result)
    .bind(command.submitted_at)
    .bind(command.executed_at)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

async fn update_command(tx: &mut Tx<'_>, command: &Command) -> Result<(), DomainError> {
    let result = sqlx::query(
        "UPDATE commands SET status = $2, credits_deducted = $3, result = $4, executed_at = $5 \
         WHERE id = $1",
    )
    .bind(command.id)
    .bind(command.status.as_str())
    .bind(command.credits_deducted)
    .bind(&command.result)
    .bind(command.executed_at)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(command_not_found(command.id));
    }

    Ok(())
}

async fn insert_approval(tx: &mut Tx<'_>, approval: &ApprovalRequest) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO approval_requests (id, command_id, requested_by, status, reviewed_by, \
                                        created_at, reviewed_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(approval.id)
    .bind(approval.command_id)
    .bind(approval.requested_by)
    .bind(approval.status.as_str())
    .bind(approval.reviewed_by)
    .bind(approval.created_at)
    .bind(approval.reviewed_at)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// Guarded on the row still being pending, so two concurrent reviews of the
/// same request cannot both take effect.
async fn update_approval(tx: &mut Tx<'_>, approval: &ApprovalRequest) -> Result<(), DomainError> {
    let result = sqlx::query(
        "UPDATE approval_requests SET status = $2, reviewed_by = $3, reviewed_at = $4 \
         WHERE id = $1 AND status = 'pending'",
    )
    .bind(approval.id)
    .bind(approval.status.as_str())
    .bind(approval.reviewed_by)
    .bind(approval.reviewed_at)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM approval_requests WHERE id = $1)")
                .bind(approval.id)
                .fetch_one(&mut **tx)
                .await
                .map_err(map_db_error)?;

        return Err(if exists {
            DomainError::AlreadyReviewed
        } else {
            approval_not_found(approval.id)
        });
    }

    Ok(())
}

async fn append_audit(tx: &mut Tx<'_>, entry: &AuditLogEntry) -> Result<(), DomainError> {
    sqlx::query(
        "INSERT INTO audit_logs (id, user_id, action, details, timestamp) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(entry.action.as_str())
    .bind(&entry.details)
    .bind(entry.timestamp)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}
