//! Audit handlers
//!
//! Read-only endpoints over the append-only audit trail.

use axum::{
    extract::{Path, State},
    Json,
};
use gate_service::dto::AuditLogResponse;
use gate_service::AuditService;

use crate::extractors::{AdminUser, ListParams};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List audit entries, newest first
///
/// GET /audit
pub async fn list_audit(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    params: ListParams,
) -> ApiResult<Json<Vec<AuditLogResponse>>> {
    let service = AuditService::new(state.service_context());
    let entries = service.list(Some(params.limit)).await?;
    Ok(Json(entries))
}

/// List one user's audit entries
///
/// GET /audit/user/{user_id}
pub async fn list_user_audit(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(user_id): Path<String>,
    params: ListParams,
) -> ApiResult<Json<Vec<AuditLogResponse>>> {
    let user_id: i64 = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = AuditService::new(state.service_context());
    let entries = service.list_for_user(user_id, Some(params.limit)).await?;
    Ok(Json(entries))
}
