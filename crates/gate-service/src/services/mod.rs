//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! the admission pipeline, the approval workflow, and admin operations.

pub mod approval;
pub mod audit;
pub mod command;
pub mod context;
pub mod error;
pub mod matcher;
pub mod rule;
pub mod seed;
pub mod user;

// Re-export all services for convenience
pub use approval::ApprovalService;
pub use audit::AuditService;
pub use command::CommandService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use rule::RuleService;
pub use seed::{SeedOutcome, SeedService};
pub use user::UserService;
