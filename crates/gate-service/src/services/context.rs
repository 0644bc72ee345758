//! Service context - dependency container for services
//!
//! Holds the repositories, the unit of work, and the ID generator behind
//! trait objects so services can run against PostgreSQL in production and
//! in-memory fakes in tests.

use std::sync::Arc;

use gate_core::traits::{
    ApprovalRepository, AuditLogRepository, CommandRepository, RuleRepository, UnitOfWork,
    UserRepository,
};
use gate_core::IdGenerator;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    rule_repo: Arc<dyn RuleRepository>,
    command_repo: Arc<dyn CommandRepository>,
    approval_repo: Arc<dyn ApprovalRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
    id_generator: Arc<IdGenerator>,
}

impl ServiceContext {
    /// Create a builder for assembling a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn rule_repo(&self) -> &dyn RuleRepository {
        self.rule_repo.as_ref()
    }

    pub fn command_repo(&self) -> &dyn CommandRepository {
        self.command_repo.as_ref()
    }

    pub fn approval_repo(&self) -> &dyn ApprovalRepository {
        self.approval_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn unit_of_work(&self) -> &dyn UnitOfWork {
        self.unit_of_work.as_ref()
    }

    /// Mint a new entity ID
    pub fn next_id(&self) -> i64 {
        self.id_generator.next_id()
    }
}

/// Builder for ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    rule_repo: Option<Arc<dyn RuleRepository>>,
    command_repo: Option<Arc<dyn CommandRepository>>,
    approval_repo: Option<Arc<dyn ApprovalRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    unit_of_work: Option<Arc<dyn UnitOfWork>>,
    id_generator: Option<Arc<IdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn rule_repo(mut self, repo: Arc<dyn RuleRepository>) -> Self {
        self.rule_repo = Some(repo);
        self
    }

    pub fn command_repo(mut self, repo: Arc<dyn CommandRepository>) -> Self {
        self.command_repo = Some(repo);
        self
    }

    pub fn approval_repo(mut self, repo: Arc<dyn ApprovalRepository>) -> Self {
        self.approval_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn unit_of_work(mut self, uow: Arc<dyn UnitOfWork>) -> Self {
        self.unit_of_work = Some(uow);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            rule_repo: self
                .rule_repo
                .ok_or_else(|| ServiceError::validation("rule_repo is required"))?,
            command_repo: self
                .command_repo
                .ok_or_else(|| ServiceError::validation("command_repo is required"))?,
            approval_repo: self
                .approval_repo
                .ok_or_else(|| ServiceError::validation("approval_repo is required"))?,
            audit_repo: self
                .audit_repo
                .ok_or_else(|| ServiceError::validation("audit_repo is required"))?,
            unit_of_work: self
                .unit_of_work
                .ok_or_else(|| ServiceError::validation("unit_of_work is required"))?,
            id_generator: self.id_generator.unwrap_or_default(),
        })
    }
}
