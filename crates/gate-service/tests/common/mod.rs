//! In-memory store backing the service tests.
//!
//! One `MemStore` implements every repository port plus the unit of work.
//! Commits clone the state, apply the batch to the clone, and swap it in
//! only when every op succeeded, mirroring transactional all-or-nothing.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use gate_core::entities::{
    ApprovalRequest, ApprovalStatus, AuditLogEntry, Command, CommandStatus, Rule, User, UserRole,
};
use gate_core::traits::{
    ApprovalRepository, AuditLogRepository, AuditLogView, AuditQuery, CommandQuery,
    CommandRepository, PendingApproval, RepoResult, RuleRepository, UnitOfWork, UserRepository,
    WriteBatch, WriteOp,
};
use gate_core::DomainError;
use gate_service::ServiceContext;

#[derive(Debug, Clone, Default)]
struct State {
    users: Vec<User>,
    rules: Vec<Rule>,
    commands: Vec<Command>,
    approvals: Vec<ApprovalRequest>,
    audits: Vec<AuditLogEntry>,
}

#[derive(Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<State>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    pub fn add_rule(&self, rule: Rule) {
        self.state.lock().unwrap().rules.push(rule);
    }

    pub fn user(&self, id: i64) -> Option<User> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    pub fn command(&self, id: i64) -> Option<Command> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.lock().unwrap().commands.clone()
    }

    pub fn approvals(&self) -> Vec<ApprovalRequest> {
        self.state.lock().unwrap().approvals.clone()
    }

    pub fn audits(&self) -> Vec<AuditLogEntry> {
        self.state.lock().unwrap().audits.clone()
    }

    pub fn rules(&self) -> Vec<Rule> {
        self.state.lock().unwrap().rules.clone()
    }
}

fn apply(state: &mut State, op: WriteOp) -> Result<(), DomainError> {
    match op {
        WriteOp::InsertUser(user) => {
            if state.users.iter().any(|u| u.username == user.username) {
                return Err(DomainError::UsernameAlreadyExists);
            }
            state.users.push(user);
        }
        WriteOp::SetUserCredits { user_id, credits } => {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(DomainError::UserNotFound(user_id))?;
            user.credits = credits;
        }
        WriteOp::DeductCredit { user_id } => {
            let user = state
                .users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or(DomainError::UserNotFound(user_id))?;
            if user.credits <= 0 {
                return Err(DomainError::InsufficientCredits);
            }
            user.credits -= 1;
        }
        WriteOp::InsertRule(rule) => state.rules.push(rule),
        WriteOp::UpdateRule(rule) => {
            let slot = state
                .rules
                .iter_mut()
                .find(|r| r.id == rule.id)
                .ok_or(DomainError::RuleNotFound(rule.id))?;
            *slot = rule;
        }
        WriteOp::DeleteRule { rule_id } => {
            let before = state.rules.len();
            state.rules.retain(|r| r.id != rule_id);
            if state.rules.len() == before {
                return Err(DomainError::RuleNotFound(rule_id));
            }
            for command in &mut state.commands {
                if command.rule_id == Some(rule_id) {
                    command.rule_id = None;
                }
            }
        }
        WriteOp::InsertCommand(command) => state.commands.push(command),
        WriteOp::UpdateCommand(command) => {
            let slot = state
                .commands
                .iter_mut()
                .find(|c| c.id == command.id)
                .ok_or(DomainError::CommandNotFound(command.id))?;
            *slot = command;
        }
        WriteOp::InsertApproval(approval) => state.approvals.push(approval),
        WriteOp::UpdateApproval(approval) => {
            let slot = state
                .approvals
                .iter_mut()
                .find(|a| a.id == approval.id)
                .ok_or(DomainError::ApprovalNotFound(approval.id))?;
            if !slot.is_pending() {
                return Err(DomainError::AlreadyReviewed);
            }
            *slot = approval;
        }
        WriteOp::AppendAudit(entry) => state.audits.push(entry),
    }
    Ok(())
}

#[async_trait]
impl UnitOfWork for MemStore {
    async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError> {
        let mut state = self.state.lock().unwrap();
        let mut staged = state.clone();
        for op in batch.into_ops() {
            apply(&mut staged, op)?;
        }
        *state = staged;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_api_key(&self, api_key: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.api_key == api_key)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .iter()
            .any(|u| u.username == username))
    }

    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<User>> {
        let mut users = self.state.lock().unwrap().users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl RuleRepository for MemStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Rule>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .rules
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_ordered(&self) -> RepoResult<Vec<Rule>> {
        let mut rules = self.state.lock().unwrap().rules.clone();
        rules.sort_by_key(Rule::order_key);
        Ok(rules)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.lock().unwrap().rules.len() as i64)
    }
}

#[async_trait]
impl CommandRepository for MemStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Command>> {
        Ok(self.command(id))
    }

    async fn list(&self, query: CommandQuery) -> RepoResult<Vec<Command>> {
        let mut commands: Vec<Command> = self
            .state
            .lock()
            .unwrap()
            .commands
            .iter()
            .filter(|c| query.user_id.map_or(true, |uid| c.user_id == uid))
            .filter(|c| query.status.map_or(true, |s| c.status == s))
            .cloned()
            .collect();
        commands.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(commands
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count_by_status(
        &self,
        user_id: Option<i64>,
    ) -> RepoResult<Vec<(CommandStatus, i64)>> {
        let state = self.state.lock().unwrap();
        let mut counts: Vec<(CommandStatus, i64)> = Vec::new();
        for command in state
            .commands
            .iter()
            .filter(|c| user_id.map_or(true, |uid| c.user_id == uid))
        {
            match counts.iter_mut().find(|(s, _)| *s == command.status) {
                Some((_, n)) => *n += 1,
                None => counts.push((command.status, 1)),
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl ApprovalRepository for MemStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<ApprovalRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .approvals
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_command(&self, command_id: i64) -> RepoResult<Option<ApprovalRequest>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .approvals
            .iter()
            .find(|a| a.command_id == command_id)
            .cloned())
    }

    async fn list_pending(&self, limit: i64, offset: i64) -> RepoResult<Vec<PendingApproval>> {
        let state = self.state.lock().unwrap();
        let mut pending: Vec<PendingApproval> = state
            .approvals
            .iter()
            .filter(|a| a.is_pending())
            .map(|a| PendingApproval {
                approval: a.clone(),
                command_text: state
                    .commands
                    .iter()
                    .find(|c| c.id == a.command_id)
                    .map(|c| c.command_text.clone())
                    .unwrap_or_default(),
                requested_by_username: state
                    .users
                    .iter()
                    .find(|u| u.id == a.requested_by)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
            })
            .collect();
        pending.sort_by(|a, b| b.approval.created_at.cmp(&a.approval.created_at));
        Ok(pending
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_by_status(&self) -> RepoResult<Vec<(ApprovalStatus, i64)>> {
        let state = self.state.lock().unwrap();
        let mut counts: Vec<(ApprovalStatus, i64)> = Vec::new();
        for approval in &state.approvals {
            match counts.iter_mut().find(|(s, _)| *s == approval.status) {
                Some((_, n)) => *n += 1,
                None => counts.push((approval.status, 1)),
            }
        }
        Ok(counts)
    }
}

#[async_trait]
impl AuditLogRepository for MemStore {
    async fn list(&self, query: AuditQuery) -> RepoResult<Vec<AuditLogView>> {
        let state = self.state.lock().unwrap();
        let mut entries: Vec<AuditLogView> = state
            .audits
            .iter()
            .filter(|e| query.user_id.map_or(true, |uid| e.user_id == uid))
            .filter(|e| query.action.map_or(true, |a| e.action == a))
            .map(|e| AuditLogView {
                id: e.id,
                user_id: e.user_id,
                username: state
                    .users
                    .iter()
                    .find(|u| u.id == e.user_id)
                    .map(|u| u.username.clone()),
                action: e.action,
                details: e.details.clone(),
                timestamp: e.timestamp,
            })
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.lock().unwrap().audits.len() as i64)
    }
}

/// A context wired to a fresh in-memory store
pub fn test_context() -> (ServiceContext, MemStore) {
    let store = MemStore::new();
    let arc = Arc::new(store.clone());
    let ctx = ServiceContext::builder()
        .user_repo(arc.clone())
        .rule_repo(arc.clone())
        .command_repo(arc.clone())
        .approval_repo(arc.clone())
        .audit_repo(arc.clone())
        .unit_of_work(arc)
        .build()
        .unwrap();
    (ctx, store)
}

static NEXT_FIXTURE_ID: std::sync::atomic::AtomicI64 = std::sync::atomic::AtomicI64::new(1);

fn fixture_id() -> i64 {
    NEXT_FIXTURE_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}

pub fn member_with_credits(store: &MemStore, credits: i64) -> User {
    let mut user = User::new(
        fixture_id(),
        format!("member-{}", fixture_id()),
        "k".repeat(64),
        UserRole::Member,
    );
    user.credits = credits;
    store.add_user(user.clone());
    user
}

pub fn admin(store: &MemStore) -> User {
    let user = User::new(
        fixture_id(),
        format!("admin-{}", fixture_id()),
        "a".repeat(64),
        UserRole::Admin,
    );
    store.add_user(user.clone());
    user
}

pub fn rule(store: &MemStore, pattern: &str, action: gate_core::entities::RuleAction, priority: i32) -> Rule {
    let rule = Rule::new(
        fixture_id(),
        pattern.to_string(),
        action,
        None,
        priority,
        None,
    );
    store.add_rule(rule.clone());
    rule
}
