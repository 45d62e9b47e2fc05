//! Repository layer for data access.

pub mod entities;
#[cfg(any(test, feature = "test-utils"))]
mod in_memory;
pub mod sql;
mod user_repository;

#[cfg(any(test, feature = "test-utils"))]
pub use in_memory::InMemoryUserRepository;
pub use user_repository::{escape_like, lock_key, UserStore};
