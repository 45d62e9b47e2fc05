//! In-memory repository for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::{DomainResult, User, UserRepository};

/// Deterministic stand-in for [`super::UserStore`].
///
/// Mirrors the storage semantics: writes are upserts keyed by id, deleting a
/// missing row is a no-op, lookups return the empty sentinel.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing users.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id, u)).collect()),
        }
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: &User) -> DomainResult<()> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, user: &User) -> DomainResult<()> {
        self.users.write().await.remove(&user.id);
        Ok(())
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<User> {
        Ok(self
            .users
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_else(User::empty))
    }

    async fn search(&self, name: &str) -> DomainResult<Vec<User>> {
        let needle = name.to_lowercase();
        let mut found: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn email_exists(&self, email: &str) -> bool {
        self.users.read().await.values().any(|u| u.email == email)
    }
}
