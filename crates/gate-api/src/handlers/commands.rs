//! Command handlers
//!
//! Endpoints for submitting commands and reading submission history.

use axum::{
    extract::{Path, State},
    Json,
};
use gate_service::dto::{CommandResponse, SubmitCommandRequest};
use gate_service::CommandService;

use crate::extractors::{AuthUser, ListParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Submit a command for admission
///
/// POST /commands
///
/// Returns 201 with the decided command record. Rejections (rule or
/// validation) are still 201; only an exhausted credit budget is an error.
pub async fn submit_command(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitCommandRequest>,
) -> ApiResult<Created<Json<CommandResponse>>> {
    let service = CommandService::new(state.service_context());
    let response = service.submit(&user, request).await?;
    Ok(Created(Json(response)))
}

/// Get the calling user's command history
///
/// GET /commands
pub async fn list_commands(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    params: ListParams,
) -> ApiResult<Json<Vec<CommandResponse>>> {
    let service = CommandService::new(state.service_context());
    let commands = service.list(&user, Some(params.limit)).await?;
    Ok(Json(commands))
}

/// Get a single command
///
/// GET /commands/{command_id}
pub async fn get_command(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(command_id): Path<String>,
) -> ApiResult<Json<CommandResponse>> {
    let command_id: i64 = command_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid command_id format"))?;

    let service = CommandService::new(state.service_context());
    let command = service.get(&user, command_id).await?;
    Ok(Json(command))
}
