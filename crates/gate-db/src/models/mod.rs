//! Database models - SQLx-compatible structs for PostgreSQL tables

mod approval;
mod audit_log;
mod command;
mod rule;
mod user;

pub use approval::{ApprovalModel, PendingApprovalModel};
pub use audit_log::{AuditLogModel, AuditLogViewModel};
pub use command::CommandModel;
pub use rule::RuleModel;
pub use user::UserModel;
