//! Approval handlers
//!
//! Endpoints for the admin review queue.

use axum::{
    extract::{Path, State},
    Json,
};
use gate_service::dto::{ApprovalResponse, ReviewApprovalRequest, ReviewOutcomeResponse};
use gate_service::ApprovalService;

use crate::extractors::{AdminUser, ListParams};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// List pending approval requests
///
/// GET /approvals
pub async fn list_pending(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    params: ListParams,
) -> ApiResult<Json<Vec<ApprovalResponse>>> {
    let service = ApprovalService::new(state.service_context());
    let pending = service.list_pending(Some(params.limit)).await?;
    Ok(Json(pending))
}

/// Review a pending approval request
///
/// POST /approvals/{approval_id}/review
pub async fn review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(approval_id): Path<String>,
    Json(request): Json<ReviewApprovalRequest>,
) -> ApiResult<Json<ReviewOutcomeResponse>> {
    let approval_id: i64 = approval_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid approval_id format"))?;

    let service = ApprovalService::new(state.service_context());
    let outcome = service.review(&admin, approval_id, request).await?;
    Ok(Json(outcome))
}
