//! Postgres-backed user repository.
//!
//! Add and update share one upsert statement. Delete runs inside a
//! transaction holding a per-user advisory lock.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Statement, TransactionTrait, Value,
};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use super::sql;
use domain::{DomainError, DomainResult, User, UserRepository};

/// Derive the advisory lock key for a user id.
///
/// Folds the 128-bit id into the signed 64-bit key space Postgres locks use.
/// Distinct ids may collide, which only costs unnecessary serialization.
pub fn lock_key(id: Uuid) -> i64 {
    let (hi, lo) = id.as_u64_pair();
    (hi ^ lo) as i64
}

/// Escape `LIKE` wildcards so a pattern matches literally.
pub fn escape_like(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    async fn upsert(&self, user: &User) -> DomainResult<()> {
        let stmt = self.statement(
            sql::UPSERT_USER,
            [
                user.id.into(),
                user.name.clone().into(),
                user.email.clone().into(),
            ],
        );

        self.db.execute(stmt).await.map_err(DomainError::storage)?;
        Ok(())
    }

    /// Lock then delete. Returns the number of rows removed.
    async fn delete_locked(txn: &DatabaseTransaction, id: Uuid) -> Result<u64, DbErr> {
        let backend = txn.get_database_backend();

        txn.execute(Statement::from_sql_and_values(
            backend,
            sql::LOCK_USER,
            [lock_key(id).into()],
        ))
        .await?;

        let result = txn
            .execute(Statement::from_sql_and_values(
                backend,
                sql::DELETE_USER,
                [id.into()],
            ))
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn add(&self, user: &User) -> DomainResult<()> {
        self.upsert(user).await
    }

    async fn delete(&self, user: &User) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(DomainError::storage)?;

        match Self::delete_locked(&txn, user.id).await {
            Ok(rows) => {
                txn.commit().await.map_err(DomainError::storage)?;
                if rows == 0 {
                    tracing::debug!(user_id = %user.id, "Delete matched no row");
                }
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(user_id = %user.id, "Rollback failed: {}", rollback_err);
                }
                Err(DomainError::storage(err))
            }
        }
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        self.upsert(user).await
    }

    async fn get_by_id(&self, id: Uuid) -> DomainResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(DomainError::storage)?;

        Ok(model.map(User::from).unwrap_or_else(User::empty))
    }

    async fn search(&self, name: &str) -> DomainResult<Vec<User>> {
        let pattern = format!("%{}%", escape_like(name));

        let models = UserEntity::find()
            .filter(Expr::col(user::Column::Name).ilike(LikeExpr::new(pattern).escape('\\')))
            .order_by_asc(user::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(DomainError::storage)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn email_exists(&self, email: &str) -> bool {
        let stmt = self.statement(sql::EMAIL_EXISTS, [email.into()]);

        let lookup = self
            .db
            .query_one(stmt)
            .await
            .and_then(|row| row.map(|r| r.try_get::<bool>("", "exists")).transpose());

        match lookup {
            Ok(found) => found.unwrap_or(false),
            Err(err) => {
                // Fail open: creation proceeds when the lookup cannot answer.
                tracing::error!("Email existence check failed: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_key_folds_both_halves() {
        let id = Uuid::from_u64_pair(0x0000_0000_0000_00ff, 0x0000_0000_0000_0f0f);

        assert_eq!(lock_key(id), 0x0ff0);
    }

    #[test]
    fn lock_key_is_stable() {
        let id = Uuid::new_v4();

        assert_eq!(lock_key(id), lock_key(id));
        assert_eq!(lock_key(Uuid::nil()), 0);
    }

    #[test]
    fn lock_key_may_be_negative() {
        let id = Uuid::from_u64_pair(u64::MAX, 0);

        assert_eq!(lock_key(id), -1);
    }

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("Doe"), "Doe");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
