//! `SQLite` implementation of [`BoxRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::BoxRepository;
use depot_domain::error::DepotError;
use depot_domain::id::{BoxId, StoreId};
use depot_domain::projection::BoxRow;
use depot_domain::storage_box::{BoxPayload, StorageBox};

use crate::error::StorageError;
use crate::joined::{BOX_ALL, BOX_BY_ID, BoxRowWrapper};

/// Wrapper for converting database rows into domain [`StorageBox`].
struct Wrapper(StorageBox);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(StorageBox {
            id: BoxId::new(row.try_get("id")?),
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            store_id: row.try_get::<Option<i64>, _>("store_id")?.map(StoreId::new),
        }))
    }
}

const INSERT: &str = "INSERT INTO boxes (code, description, store_id) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM boxes WHERE id = ?";
const UPDATE: &str = "UPDATE boxes SET code = ?, description = ?, store_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM boxes WHERE id = ?";
const DETACH_FROM_STORE: &str = "UPDATE boxes SET store_id = NULL WHERE store_id = ?";

/// `SQLite`-backed box repository.
pub struct SqliteBoxRepository {
    pool: SqlitePool,
}

impl SqliteBoxRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BoxRepository for SqliteBoxRepository {
    fn create(
        &self,
        storage_box: BoxPayload,
    ) -> impl Future<Output = Result<StorageBox, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&storage_box.code)
                .bind(&storage_box.description)
                .bind(storage_box.store_id.map(StoreId::get))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(storage_box.into_box(BoxId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: BoxId,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send {
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

    fn get_joined(
        &self,
        id: BoxId,
    ) -> impl Future<Output = Result<Option<BoxRow>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<BoxRowWrapper> = sqlx::query_as(BOX_BY_ID.as_str())
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn list_joined(&self) -> impl Future<Output = Result<Vec<BoxRow>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<BoxRowWrapper> = sqlx::query_as(BOX_ALL.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        storage_box: StorageBox,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&storage_box.code)
                .bind(&storage_box.description)
                .bind(storage_box.store_id.map(StoreId::get))
                .bind(storage_box.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(storage_box))
        }
    }

    fn delete(&self, id: BoxId) -> impl Future<Output = Result<bool, DepotError>> + Send {
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

    fn detach_from_store(
        &self,
        store_id: StoreId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DETACH_FROM_STORE)
                .bind(store_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }
}
