use std::fmt;

use crate::db::DaoError;

pub mod budget;
pub mod transaction;

#[derive(Debug)]
pub enum LedgerError {
    InvalidInput(String),
    NotFound(String),
    Forbidden(String),
    Store(DaoError),
}

impl std::error::Error for LedgerError {}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidInput(msg) => write!(f, "LedgerError: Invalid input: {msg}"),
            LedgerError::NotFound(msg) => write!(f, "LedgerError: Not found: {msg}"),
            LedgerError::Forbidden(msg) => write!(f, "LedgerError: Forbidden: {msg}"),
            LedgerError::Store(e) => write!(f, "LedgerError: Store failure: {e}"),
        }
    }
}

impl From<DaoError> for LedgerError {
    fn from(error: DaoError) -> Self {
        LedgerError::Store(error)
    }
}

/// Result of a create operation. A request matching an existing record's
/// unique key succeeds by returning that record instead of inserting a
/// second one; callers must branch on the outcome rather than treating the
/// duplicate as a failure.
#[derive(Clone, Debug)]
pub enum CreateOutcome<T> {
    Created(T),
    AlreadyExists(T),
}
