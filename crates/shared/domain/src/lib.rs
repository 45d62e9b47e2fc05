//! Domain layer - Core business entity and its persistence capability.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The `UserRepository` trait is the seam every storage backend implements;
//! the use-case layer depends on it and nothing more concrete.

pub mod error;
pub mod repository;
pub mod user;

pub use error::{DomainError, DomainResult, StorageError};
pub use repository::UserRepository;
pub use user::User;

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
