//! User service - account provisioning and credit administration

use gate_core::entities::{AuditAction, AuditLogEntry, CommandStatus, User};
use gate_core::traits::{WriteBatch, WriteOp};
use gate_core::DomainError;
use serde_json::json;
use tracing::{info, instrument};

use gate_common::generate_api_key;

use crate::dto::{
    CreateUserRequest, CreditsUpdatedResponse, UpdateCreditsRequest, UserCreatedResponse,
    UserResponse, UserStatsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_LIMIT: i64 = 100;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a user (admin only).
    ///
    /// The generated API key appears in this response and nowhere else.
    #[instrument(skip(self, request), fields(admin_id = admin.id))]
    pub async fn create(
        &self,
        admin: &User,
        request: CreateUserRequest,
    ) -> ServiceResult<UserCreatedResponse> {
        if self.ctx.user_repo().username_exists(&request.username).await? {
            return Err(ServiceError::from(DomainError::UsernameAlreadyExists));
        }

        let user = User::new(
            self.ctx.next_id(),
            request.username,
            generate_api_key(),
            request.role,
        );

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::InsertUser(user.clone()));
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            admin.id,
            AuditAction::UserCreated,
            json!({
                "created_user_id": user.id,
                "created_username": user.username,
                "role": user.role,
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(user_id = user.id, username = %user.username, "user created");
        Ok(UserCreatedResponse::from(&user))
    }

    /// List all users (admin only)
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<i64>) -> ServiceResult<Vec<UserResponse>> {
        let users = self
            .ctx
            .user_repo()
            .list(limit.unwrap_or(DEFAULT_LIMIT), 0)
            .await?;

        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// The calling user's own profile
    pub fn me(&self, user: &User) -> UserResponse {
        UserResponse::from(user)
    }

    /// The calling user's credit balance and command counters
    #[instrument(skip(self), fields(user_id = user.id))]
    pub async fn stats(&self, user: &User) -> ServiceResult<UserStatsResponse> {
        let counts = self.ctx.command_repo().count_by_status(Some(user.id)).await?;

        let mut total = 0;
        let mut executed = 0;
        let mut rejected = 0;
        for (status, count) in counts {
            total += count;
            match status {
                CommandStatus::Executed => executed += count,
                CommandStatus::Rejected => rejected += count,
                _ => {}
            }
        }

        Ok(UserStatsResponse {
            credits: user.credits,
            total_commands: total,
            executed_commands: executed,
            rejected_commands: rejected,
        })
    }

    /// Set a user's credit balance (admin only)
    #[instrument(skip(self, request), fields(admin_id = admin.id, user_id))]
    pub async fn set_credits(
        &self,
        admin: &User,
        user_id: i64,
        request: UpdateCreditsRequest,
    ) -> ServiceResult<CreditsUpdatedResponse> {
        let target = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut batch = WriteBatch::new();
        batch.push(WriteOp::SetUserCredits {
            user_id: target.id,
            credits: request.credits,
        });
        batch.push(WriteOp::AppendAudit(AuditLogEntry::new(
            self.ctx.next_id(),
            admin.id,
            AuditAction::CreditsUpdated,
            json!({
                "target_user_id": target.id,
                "old_credits": target.credits,
                "new_credits": request.credits,
            }),
        )));
        self.ctx.unit_of_work().commit(batch).await?;

        info!(
            user_id = target.id,
            old_credits = target.credits,
            new_credits = request.credits,
            "credits updated"
        );
        Ok(CreditsUpdatedResponse {
            message: "Credits updated successfully".to_string(),
            new_credits: request.credits,
        })
    }
}
