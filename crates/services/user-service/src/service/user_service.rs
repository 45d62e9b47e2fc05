//! User service - Handles user-related business logic.
//!
//! Enforces email uniqueness on create and existence before mutation, on top
//! of any [`UserRepository`] backend.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use domain::{DomainError, DomainResult, User, UserRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user and return its freshly generated id.
    ///
    /// Fails with `Conflict` when the email is already taken.
    async fn add(&self, name: String, email: String) -> DomainResult<Uuid>;

    /// Delete an existing user; `NotFound` when absent.
    async fn delete(&self, id: Uuid) -> DomainResult<()>;

    /// Overwrite name and email of an existing user; `NotFound` when absent.
    async fn update(&self, id: Uuid, name: String, email: String) -> DomainResult<()>;

    /// Find a user by id. Absence yields the empty sentinel, not an error.
    async fn get_by_id(&self, id: Uuid) -> DomainResult<User>;

    /// Users whose name contains `name`, ignoring case.
    async fn search(&self, name: &str) -> DomainResult<Vec<User>>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Fetch a user, turning the sentinel into `NotFound`.
    async fn existing(&self, id: Uuid) -> DomainResult<User> {
        let user = self.repo.get_by_id(id).await?;
        if user.is_empty() {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }
}

#[async_trait]
impl UserService for UserManager {
    #[tracing::instrument(skip(self, email))]
    async fn add(&self, name: String, email: String) -> DomainResult<Uuid> {
        if self.repo.email_exists(&email).await {
            return Err(DomainError::conflict("Email"));
        }

        let user = User::new(Uuid::new_v4(), name, email);
        self.repo.add(&user).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user.id)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        // Not covered by the repository's lock; a concurrent delete may land
        // in between, which the repository treats as a no-op.
        let user = self.existing(id).await?;
        self.repo.delete(&user).await
    }

    #[tracing::instrument(skip(self, email))]
    async fn update(&self, id: Uuid, name: String, email: String) -> DomainResult<()> {
        let mut user = self.existing(id).await?;
        user.rename(name, email);
        self.repo.update(&user).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> DomainResult<User> {
        self.repo.get_by_id(id).await
    }

    #[tracing::instrument(skip(self))]
    async fn search(&self, name: &str) -> DomainResult<Vec<User>> {
        self.repo.search(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::MockUserRepository;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    use crate::repository::InMemoryUserRepository;

    fn test_user(id: Uuid) -> User {
        User::new(id, "John Doe", "john@example.com")
    }

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn add_generates_id_and_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists()
            .with(eq("john@example.com"))
            .times(1)
            .returning(|_| false);
        repo.expect_add()
            .withf(|u| !u.is_empty() && u.name == "John Doe" && u.email == "john@example.com")
            .times(1)
            .returning(|_| Ok(()));

        let id = manager(repo)
            .add("John Doe".into(), "john@example.com".into())
            .await
            .unwrap();

        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn add_rejects_taken_email_without_writing() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| true);
        repo.expect_add().never();

        let result = manager(repo)
            .add("Bea".into(), "ana@x.com".into())
            .await;

        assert!(matches!(result, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn add_propagates_storage_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| false);
        repo.expect_add()
            .returning(|_| Err(DomainError::storage(DbErr::Custom("connection reset".into()))));

        let err = manager(repo)
            .add("Ana".into(), "ana@x.com".into())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(User::empty()));
        repo.expect_update().never();

        let result = manager(repo)
            .update(id, "Ana B".into(), "anab@x.com".into())
            .await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_id() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(|id| Ok(test_user(id)));
        repo.expect_update()
            .withf(move |u| u.id == id && u.name == "Ana B" && u.email == "anab@x.com")
            .times(1)
            .returning(|_| Ok(()));

        manager(repo)
            .update(id, "Ana B".into(), "anab@x.com".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(User::empty()));
        repo.expect_delete().never();

        let result = manager(repo).delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_passes_fetched_user_to_repository() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|id| Ok(test_user(id)));
        repo.expect_delete()
            .withf(move |u| u.id == id)
            .times(1)
            .returning(|_| Ok(()));

        manager(repo).delete(id).await.unwrap();
    }

    #[tokio::test]
    async fn get_by_id_passes_sentinel_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(User::empty()));

        let user = manager(repo).get_by_id(Uuid::new_v4()).await.unwrap();

        assert!(user.is_empty());
    }

    #[tokio::test]
    async fn search_accepts_empty_pattern() {
        let mut repo = MockUserRepository::new();
        repo.expect_search()
            .with(eq(""))
            .returning(|_| Ok(vec![test_user(Uuid::new_v4())]));

        let users = manager(repo).search("").await.unwrap();

        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn email_check_fault_lets_creation_proceed() {
        // An email check that cannot reach storage reports "unused".
        let mut repo = MockUserRepository::new();
        repo.expect_email_exists().returning(|_| false);
        repo.expect_add().times(1).returning(|_| Ok(()));

        let result = manager(repo)
            .add("Ana".into(), "ana@x.com".into())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn lifecycle_against_in_memory_store() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let service = UserManager::new(repo.clone());

        let ana = service
            .add("Ana".into(), "ana@x.com".into())
            .await
            .unwrap();

        let dup = service.add("Bea".into(), "ana@x.com".into()).await;
        assert!(matches!(dup, Err(DomainError::Conflict(_))));
        assert_eq!(repo.len().await, 1);

        service
            .update(ana, "Ana B".into(), "anab@x.com".into())
            .await
            .unwrap();
        assert_eq!(
            service.get_by_id(ana).await.unwrap(),
            User::new(ana, "Ana B", "anab@x.com")
        );

        service.delete(ana).await.unwrap();
        assert!(service.get_by_id(ana).await.unwrap().is_empty());

        let again = service.delete(ana).await;
        assert!(matches!(again, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn round_trip_returns_stored_fields() {
        let service = UserManager::new(Arc::new(InMemoryUserRepository::new()));

        let id = service
            .add("John Doe".into(), "john@example.com".into())
            .await
            .unwrap();
        let user = service.get_by_id(id).await.unwrap();

        assert_eq!(user, User::new(id, "John Doe", "john@example.com"));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let repo = InMemoryUserRepository::with_users([
            User::new(Uuid::new_v4(), "John Doe", "john@example.com"),
            User::new(Uuid::new_v4(), "Jane Smith", "jane@example.com"),
        ]);
        let service = UserManager::new(Arc::new(repo));

        let found = service.search("doe").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "John Doe");
    }

    #[tokio::test]
    async fn repeated_upsert_keeps_single_row() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::new_v4();

        repo.add(&User::new(id, "Ana", "ana@x.com")).await.unwrap();
        repo.add(&User::new(id, "Ana B", "anab@x.com")).await.unwrap();

        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get_by_id(id).await.unwrap().name, "Ana B");
    }

    /// Use-case outcome contract only: the in-memory store serializes
    /// trivially. The backend advisory lock is covered by the SQL-shape tests
    /// in `tests/user_repository_test.rs`.
    #[tokio::test]
    async fn concurrent_deletes_settle_on_one_outcome() {
        let id = Uuid::new_v4();
        let repo = Arc::new(InMemoryUserRepository::with_users([test_user(id)]));
        let service = Arc::new(UserManager::new(repo.clone()));

        let (first, second) = tokio::join!(
            {
                let service = service.clone();
                async move { service.delete(id).await }
            },
            {
                let service = service.clone();
                async move { service.delete(id).await }
            }
        );

        for outcome in [first, second] {
            assert!(matches!(outcome, Ok(()) | Err(DomainError::NotFound(_))));
        }
        assert!(repo.is_empty().await);
    }
}
