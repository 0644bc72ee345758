//! User handlers
//!
//! Endpoints for account provisioning, profiles, and credit administration.

use axum::{
    extract::{Path, State},
    Json,
};
use gate_service::dto::{
    CommandResponse, CreateUserRequest, CreditsUpdatedResponse, UpdateCreditsRequest,
    UserCreatedResponse, UserResponse, UserStatsResponse,
};
use gate_service::{CommandService, UserService};

use crate::extractors::{AdminUser, AuthUser, ListParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Create a user
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<Json<UserCreatedResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.create(&admin, request).await?;
    Ok(Created(Json(response)))
}

/// List all users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    params: ListParams,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.list(Some(params.limit)).await?;
    Ok(Json(users))
}

/// Get the calling user's profile
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.me(&user)))
}

/// Get the calling user's statistics
///
/// GET /users/me/stats
pub async fn get_current_user_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UserStatsResponse>> {
    let service = UserService::new(state.service_context());
    let stats = service.stats(&user).await?;
    Ok(Json(stats))
}

/// Get the calling user's command history
///
/// GET /users/me/commands
pub async fn get_current_user_commands(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    params: ListParams,
) -> ApiResult<Json<Vec<CommandResponse>>> {
    let service = CommandService::new(state.service_context());
    let commands = service.list(&user, Some(params.limit)).await?;
    Ok(Json(commands))
}

/// Set a user's credit balance
///
/// PATCH /users/{user_id}/credits
pub async fn update_credits(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCreditsRequest>,
) -> ApiResult<Json<CreditsUpdatedResponse>> {
    let user_id: i64 = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = UserService::new(state.service_context());
    let response = service.set_credits(&admin, user_id, request).await?;
    Ok(Json(response))
}
