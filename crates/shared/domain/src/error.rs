//! Errors raised by account rules, access checks and password handling.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A named input field was rejected
    #[error("{field}: {message}")]
    Field { field: String, message: String },

    /// Plain-text password rejected before hashing
    #[error("Password error: {0}")]
    Password(String),

    /// No authenticated caller
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated caller lacks the role or ownership
    #[error("Forbidden")]
    Forbidden,

    /// Hashing backend failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
