//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the family tree's relationship rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person not found: {0}")]
    PersonNotFound(String),

    #[error("already married: {name}")]
    AlreadyMarried { name: String },

    #[error("unknown parent role: {0} (expected father or mother)")]
    UnknownRole(String),

    #[error("person handle no longer refers to a node in this tree")]
    StaleHandle,
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
