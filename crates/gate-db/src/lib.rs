//! # gate-db
//!
//! Database layer implementing the repository and unit-of-work traits with
//! PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the ports defined in
//! `gate-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Read-only repository implementations
//! - The transactional unit of work applying write batches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gate_db::pool::{create_pool, DatabaseConfig};
//! use gate_db::repositories::{PgUnitOfWork, PgUserRepository};
//! use gate_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let user_repo = PgUserRepository::new(pool.clone());
//!     let uow = PgUnitOfWork::new(pool);
//!
//!     // Use the repositories...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgApprovalRepository, PgAuditLogRepository, PgCommandRepository, PgRuleRepository,
    PgUnitOfWork, PgUserRepository,
};
