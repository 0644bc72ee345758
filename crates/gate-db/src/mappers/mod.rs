//! Entity <-> model mappers
//!
//! Models carry enum columns as strings; mapping back to entities is
//! fallible and surfaces bad stored values as `DomainError::DatabaseError`.

mod approval;
mod audit_log;
mod command;
mod rule;
mod user;

use gate_core::DomainError;

/// Map a stored enum string that fails to parse
pub(crate) fn bad_column(table: &str, column: &str, value: &str) -> DomainError {
    DomainError::DatabaseError(format!("invalid {table}.{column} value: {value}"))
}
