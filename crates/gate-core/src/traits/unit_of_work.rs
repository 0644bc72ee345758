//! Unit-of-work port - atomic multi-record writes
//!
//! Services describe a state transition as a `WriteBatch` of `WriteOp`s and
//! hand it to the `UnitOfWork`, which applies every op in a single database
//! transaction. Either the whole transition commits or none of it does; a
//! failing `DeductCredit` rolls back command updates and audit entries staged
//! alongside it.

use async_trait::async_trait;

use crate::entities::{ApprovalRequest, AuditLogEntry, Command, Rule, User};
use crate::error::DomainError;

/// A single write staged in a batch
#[derive(Debug, Clone)]
pub enum WriteOp {
    InsertUser(User),
    /// Set a user's credit balance to an absolute value
    SetUserCredits {
        user_id: i64,
        credits: i64,
    },
    /// Deduct exactly one credit, failing the batch with
    /// `DomainError::InsufficientCredits` if the balance is already zero.
    /// The check and the decrement are one conditional statement, so two
    /// concurrent batches cannot both spend the last credit.
    DeductCredit {
        user_id: i64,
    },
    InsertRule(Rule),
    UpdateRule(Rule),
    DeleteRule {
        rule_id: i64,
    },
    InsertCommand(Command),
    UpdateCommand(Command),
    InsertApproval(ApprovalRequest),
    UpdateApproval(ApprovalRequest),
    AppendAudit(AuditLogEntry),
}

/// An ordered collection of writes that commit together
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an op; ops are applied in staging order
    pub fn push(&mut self, op: WriteOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Atomic write port implemented by the infrastructure layer
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Apply every op in the batch within one transaction.
    ///
    /// On any error the transaction is rolled back and no op takes effect.
    async fn commit(&self, batch: WriteBatch) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_preserves_staging_order() {
        let mut batch = WriteBatch::new();
        batch
            .push(WriteOp::DeductCredit { user_id: 1 })
            .push(WriteOp::DeleteRule { rule_id: 2 });

        assert_eq!(batch.len(), 2);
        assert!(matches!(
            batch.ops()[0],
            WriteOp::DeductCredit { user_id: 1 }
        ));
        assert!(matches!(batch.ops()[1], WriteOp::DeleteRule { rule_id: 2 }));
    }

    #[test]
    fn test_empty_batch() {
        let batch = WriteBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
