//! Ports - repository and unit-of-work traits implemented by the
//! infrastructure layer

mod repositories;
mod unit_of_work;

pub use repositories::{
    ApprovalRepository, AuditLogRepository, AuditLogView, AuditQuery, CommandQuery,
    CommandRepository, PendingApproval, RepoResult, RuleRepository, UserRepository,
};
pub use unit_of_work::{UnitOfWork, WriteBatch, WriteOp};
