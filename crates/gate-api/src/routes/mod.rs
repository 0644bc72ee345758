//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{approvals, audit, commands, health, rules, users};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(command_routes())
        .merge(user_routes())
        .merge(rule_routes())
        .merge(approval_routes())
        .merge(audit_routes())
}

/// Command routes
fn command_routes() -> Router<AppState> {
    Router::new()
        .route("/commands", post(commands::submit_command))
        .route("/commands", get(commands::list_commands))
        .route("/commands/:command_id", get(commands::get_command))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users", get(users::list_users))
        .route("/users/me", get(users::get_current_user))
        .route("/users/me/stats", get(users::get_current_user_stats))
        .route("/users/me/commands", get(users::get_current_user_commands))
        .route("/users/:user_id/credits", patch(users::update_credits))
}

/// Rule routes
fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", post(rules::create_rule))
        .route("/rules", get(rules::list_rules))
        .route("/rules/:rule_id", get(rules::get_rule))
        .route("/rules/:rule_id", put(rules::update_rule))
        .route("/rules/:rule_id", delete(rules::delete_rule))
}

/// Approval routes
fn approval_routes() -> Router<AppState> {
    Router::new()
        .route("/approvals", get(approvals::list_pending))
        .route("/approvals/:approval_id/review", post(approvals::review))
}

/// Audit routes
fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/audit", get(audit::list_audit))
        .route("/audit/user/:user_id", get(audit::list_user_audit))
}
