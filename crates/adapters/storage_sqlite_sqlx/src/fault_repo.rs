//! `SQLite` implementation of [`FaultRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::FaultRepository;
use depot_domain::error::DepotError;
use depot_domain::fault::{Fault, NewFault};
use depot_domain::id::{FaultId, ItemId};
use depot_domain::time::Timestamp;

use crate::codec::{decode_status, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Fault`].
struct Wrapper(Fault);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;
        Ok(Self(Fault {
            id: FaultId::new(row.try_get("id")?),
            item_id: ItemId::new(row.try_get("item_id")?),
            status: decode_status(row.try_get("status")?)?,
            description: row.try_get("description")?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        }))
    }
}

const INSERT: &str = "INSERT INTO faults (item_id, status, description, created_at, updated_at) \
                      VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM faults WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM faults ORDER BY id";
const SELECT_BY_ITEM: &str = "SELECT * FROM faults WHERE item_id = ? ORDER BY id";
const UPDATE: &str = "UPDATE faults SET item_id = ?, status = ?, description = ?, \
                      created_at = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM faults WHERE id = ?";
const DELETE_BY_ITEM: &str = "DELETE FROM faults WHERE item_id = ?";

/// `SQLite`-backed fault repository.
pub struct SqliteFaultRepository {
    pool: SqlitePool,
}

impl SqliteFaultRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FaultRepository for SqliteFaultRepository {
    fn create(
        &self,
        fault: NewFault,
        at: Timestamp,
    ) -> impl Future<Output = Result<Fault, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let stamp = encode_timestamp(at);
            let result = sqlx::query(INSERT)
                .bind(fault.item_id.get())
                .bind(fault.status.ordinal())
                .bind(&fault.description)
                .bind(&stamp)
                .bind(&stamp)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Fault {
                id: FaultId::new(result.last_insert_rowid()),
                item_id: fault.item_id,
                status: fault.status,
                description: fault.description,
                created_at: at,
                updated_at: at,
            })
        }
    }

    fn get_by_id(
        &self,
        id: FaultId,
    ) -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ITEM)
                .bind(item_id.get())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        fault: Fault,
    ) -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(fault.item_id.get())
                .bind(fault.status.ordinal())
                .bind(&fault.description)
                .bind(encode_timestamp(fault.created_at))
                .bind(encode_timestamp(fault.updated_at))
                .bind(fault.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(fault))
        }
    }

    fn delete(&self, id: FaultId) -> impl Future<Output = Result<bool, DepotError>> + Send {
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

    fn delete_by_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ITEM)
                .bind(item_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }
}
