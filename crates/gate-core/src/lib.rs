//! # gate-core
//!
//! Domain layer for the command gateway: entities, the command validator,
//! repository traits, and the unit-of-work abstraction. This crate has zero
//! dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod id;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use entities::{
    ApprovalRequest, ApprovalStatus, AuditAction, AuditLogEntry, Command, CommandStatus, Rule,
    RuleAction, User, UserRole,
};
pub use error::DomainError;
pub use id::IdGenerator;
pub use traits::{
    ApprovalRepository, AuditLogRepository, AuditLogView, AuditQuery, CommandQuery,
    CommandRepository, PendingApproval, RepoResult, RuleRepository, UnitOfWork, UserRepository,
    WriteBatch, WriteOp,
};
pub use validation::validate_command;
