//! Domain error model.

use thiserror::Error;

use crate::id::UserId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is raised before any state is mutated, so a failed command
/// leaves the ledger exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (non-positive amount, empty participants, blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A payer or participant id is not registered.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// A user id is already registered and the ledger rejects duplicates.
    #[error("user already registered: {0}")]
    DuplicateUser(UserId),

    /// An identifier was invalid (e.g. blank or unparsable).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_user(id: &UserId) -> Self {
        Self::UnknownUser(id.clone())
    }
}
