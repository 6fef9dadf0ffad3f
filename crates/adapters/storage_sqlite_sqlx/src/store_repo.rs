//! `SQLite` implementation of [`StoreRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::StoreRepository;
use depot_domain::error::DepotError;
use depot_domain::id::{StoreId, UserId};
use depot_domain::store::{Store, StorePayload};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Store`].
struct Wrapper(Store);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Store {
            id: StoreId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            manager_id: UserId::new(row.try_get("manager_id")?),
        }))
    }
}

const INSERT: &str = "INSERT INTO stores (name, address, manager_id) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM stores WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM stores ORDER BY id";
const UPDATE: &str = "UPDATE stores SET name = ?, address = ?, manager_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM stores WHERE id = ?";

/// `SQLite`-backed store repository.
pub struct SqliteStoreRepository {
    pool: SqlitePool,
}

impl SqliteStoreRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl StoreRepository for SqliteStoreRepository {
    fn create(&self, store: StorePayload) -> impl Future<Output = Result<Store, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&store.name)
                .bind(&store.address)
                .bind(store.manager_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(store.into_store(StoreId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: StoreId,
    ) -> impl Future<Output = Result<Option<Store>, DepotError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Store>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        store: Store,
    ) -> impl Future<Output = Result<Option<Store>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&store.name)
                .bind(&store.address)
                .bind(store.manager_id.get())
                .bind(store.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(store))
        }
    }

    fn delete(&self, id: StoreId) -> impl Future<Output = Result<bool, DepotError>> + Send {
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
