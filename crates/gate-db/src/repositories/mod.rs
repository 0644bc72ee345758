//! Repository and unit-of-work implementations
//!
//! PostgreSQL implementations of the ports defined in gate-core. The
//! repositories are query-only; every state-changing write is applied by
//! `PgUnitOfWork` inside a single transaction.

mod approval;
mod audit_log;
mod command;
mod error;
mod rule;
mod unit_of_work;
mod user;

pub use approval::PgApprovalRepository;
pub use audit_log::PgAuditLogRepository;
pub use command::PgCommandRepository;
pub use rule::PgRuleRepository;
pub use unit_of_work::PgUnitOfWork;
pub use user::PgUserRepository;
