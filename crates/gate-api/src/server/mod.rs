//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use gate_common::{AppConfig, AppError};
use gate_db::{
    create_pool, run_migrations, PgApprovalRepository, PgAuditLogRepository, PgCommandRepository,
    PgRuleRepository, PgUnitOfWork, PgUserRepository,
};
use gate_service::{ServiceContext, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config().clone();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    // Health endpoints sit outside the rate limiter so probes never 429
    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = gate_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Migrations applied");

    let service_context = build_service_context(&pool)?;

    Ok(AppState::new(service_context, config, pool))
}

/// Wire the repositories and unit of work onto a pool
pub fn build_service_context(pool: &gate_db::PgPool) -> Result<ServiceContext, AppError> {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .rule_repo(Arc::new(PgRuleRepository::new(pool.clone())))
        .command_repo(Arc::new(PgCommandRepository::new(pool.clone())))
        .approval_repo(Arc::new(PgApprovalRepository::new(pool.clone())))
        .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .unit_of_work(Arc::new(PgUnitOfWork::new(pool.clone())))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
