//! `SQLite` implementation of [`UserRepository`].
//!
//! The password hash is only ever read by [`find_credentials`]; every other
//! query selects the public columns.
//!
//! [`find_credentials`]: UserRepository::find_credentials

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::UserRepository;
use depot_domain::error::DepotError;
use depot_domain::id::UserId;
use depot_domain::user::{NewUser, User};

use crate::codec::decode_right;
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`User`].
struct Wrapper(User);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(User {
            id: UserId::new(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            right: decode_right(row.try_get("right")?)?,
        }))
    }
}

struct CredentialsWrapper(User, String);

impl<'r> FromRow<'r, SqliteRow> for CredentialsWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let Wrapper(user) = Wrapper::from_row(row)?;
        Ok(Self(user, row.try_get("password_hash")?))
    }
}

const INSERT: &str =
    "INSERT INTO users (username, email, password_hash, \"right\") VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT id, username, email, \"right\" FROM users WHERE id = ?";
const SELECT_CREDENTIALS: &str =
    "SELECT id, username, email, \"right\", password_hash FROM users WHERE username = ?";
const SELECT_ALL: &str = "SELECT id, username, email, \"right\" FROM users ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, DepotError>> + Send {
        let pool = self.pool.clone();
        let username = user.username.clone();
        let email = user.email.clone();
        let right = user.right;
        let password_hash = password_hash.to_string();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&username)
                .bind(&email)
                .bind(&password_hash)
                .bind(right.level())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(User {
                id: UserId::new(result.last_insert_rowid()),
                username,
                email,
                right,
            })
        }
    }

    fn get_by_id(&self, id: UserId) -> impl Future<Output = Result<Option<User>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn find_credentials(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<(User, String)>, DepotError>> + Send {
        let pool = self.pool.clone();
        let username = username.to_string();
        async move {
            let row: Option<CredentialsWrapper> = sqlx::query_as(SELECT_CREDENTIALS)
                .bind(&username)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| (w.0, w.1)))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use depot_domain::user::UserRight;

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.org"),
            password: "plain".to_string(),
            right: UserRight::Member,
        }
    }

    #[tokio::test]
    async fn should_create_and_retrieve_user() {
        let repo = setup().await;
        let created = repo.create(&new_user("frank"), "$2b$hash").await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.right, UserRight::Member);
    }

    #[tokio::test]
    async fn should_return_hash_only_with_credentials() {
        let repo = setup().await;
        let created = repo.create(&new_user("frank"), "$2b$hash").await.unwrap();

        let (user, hash) = repo.find_credentials("frank").await.unwrap().unwrap();
        assert_eq!(user, created);
        assert_eq!(hash, "$2b$hash");
        assert!(repo.find_credentials("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_whether_a_row_was_deleted() {
        let repo = setup().await;
        let created = repo.create(&new_user("frank"), "h").await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
