//! Domain-level errors.
//!
//! These errors represent business rule violations and storage faults.
//! They are independent of infrastructure concerns (HTTP, database driver).

use std::error::Error as StdError;

use thiserror::Error;

/// Domain-specific errors.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Entity already exists (conflict)
    #[error("{0} already exists")]
    Conflict(String),

    /// Underlying storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Opaque backend failure, carried upward without reinterpretation.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StorageError(Box<dyn StdError + Send + Sync + 'static>);

impl StorageError {
    /// Wrap a backend error.
    pub fn new(err: impl StdError + Send + Sync + 'static) -> Self {
        Self(Box::new(err))
    }

    /// Borrow the original backend error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }

    /// Wrap a backend failure
    pub fn storage(err: impl StdError + Send + Sync + 'static) -> Self {
        DomainError::Storage(StorageError::new(err))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
