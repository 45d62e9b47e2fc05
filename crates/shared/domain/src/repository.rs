//! Persistence capability required by the user use cases.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainResult;
use crate::user::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Lookups that find nothing return [`User::empty`] rather than an error;
/// callers must check [`User::is_empty`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user. Repeating the call for the same id overwrites the row.
    async fn add(&self, user: &User) -> DomainResult<()>;

    /// Remove the row for `user.id`, serialized against other mutations of
    /// the same id.
    async fn delete(&self, user: &User) -> DomainResult<()>;

    /// Overwrite name and email for `user.id`. Does not verify existence.
    async fn update(&self, user: &User) -> DomainResult<()>;

    /// Find a user by ID, or the empty sentinel
    async fn get_by_id(&self, id: Uuid) -> DomainResult<User>;

    /// Case-insensitive substring match on name. Empty pattern matches all.
    async fn search(&self, name: &str) -> DomainResult<Vec<User>>;

    /// Whether any user holds `email`.
    ///
    /// Storage failures are logged and reported as `false`: a faulty check
    /// lets creation proceed instead of blocking it.
    async fn email_exists(&self, email: &str) -> bool;
}
