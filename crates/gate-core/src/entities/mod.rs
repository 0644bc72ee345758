//! Domain entities - core business objects

mod approval;
mod audit;
mod command;
mod rule;
mod user;

pub use approval::{ApprovalRequest, ApprovalStatus};
pub use audit::{AuditAction, AuditLogEntry};
pub use command::{format_execution_result, Command, CommandStatus};
pub use rule::{Rule, RuleAction};
pub use user::{User, UserRole, DEFAULT_CREDITS};
