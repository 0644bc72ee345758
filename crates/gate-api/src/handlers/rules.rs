//! Rule handlers
//!
//! Endpoints for managing the admission rule set. Reads are open to any
//! authenticated user; writes are admin-only.

use axum::{
    extract::{Path, State},
    Json,
};
use gate_service::dto::{CreateRuleRequest, RuleResponse, UpdateRuleRequest};
use gate_service::RuleService;

use crate::extractors::{AdminUser, AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a rule
///
/// POST /rules
pub async fn create_rule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ValidatedJson(request): ValidatedJson<CreateRuleRequest>,
) -> ApiResult<Created<Json<RuleResponse>>> {
    let service = RuleService::new(state.service_context());
    let response = service.create(&admin, request).await?;
    Ok(Created(Json(response)))
}

/// List rules in evaluation order
///
/// GET /rules
pub async fn list_rules(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> ApiResult<Json<Vec<RuleResponse>>> {
    let service = RuleService::new(state.service_context());
    let rules = service.list().await?;
    Ok(Json(rules))
}

/// Get a rule
///
/// GET /rules/{rule_id}
pub async fn get_rule(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(rule_id): Path<String>,
) -> ApiResult<Json<RuleResponse>> {
    let rule_id = parse_rule_id(&rule_id)?;
    let service = RuleService::new(state.service_context());
    let rule = service.get(rule_id).await?;
    Ok(Json(rule))
}

/// Update a rule
///
/// PUT /rules/{rule_id}
pub async fn update_rule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(rule_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRuleRequest>,
) -> ApiResult<Json<RuleResponse>> {
    let rule_id = parse_rule_id(&rule_id)?;
    let service = RuleService::new(state.service_context());
    let rule = service.update(&admin, rule_id, request).await?;
    Ok(Json(rule))
}

/// Delete a rule
///
/// DELETE /rules/{rule_id}
pub async fn delete_rule(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(rule_id): Path<String>,
) -> ApiResult<NoContent> {
    let rule_id = parse_rule_id(&rule_id)?;
    let service = RuleService::new(state.service_context());
    service.delete(&admin, rule_id).await?;
    Ok(NoContent)
}

fn parse_rule_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid rule_id format"))
}
