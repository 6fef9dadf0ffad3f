//! `SQLite` implementation of [`ItemRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::ItemRepository;
use depot_domain::error::DepotError;
use depot_domain::id::{BoxId, EquipmentId, ItemId};
use depot_domain::item::{Item, ItemFilter, ItemPayload};
use depot_domain::projection::ItemRow;

use crate::error::StorageError;
use crate::joined::{ITEM_BY_ID, ITEM_FILTERED, ItemRowWrapper};

/// Wrapper for converting database rows into domain [`Item`].
struct Wrapper(Item);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Item {
            id: ItemId::new(row.try_get("id")?),
            code: row.try_get("code")?,
            description: row.try_get("description")?,
            equipment_id: EquipmentId::new(row.try_get("equipment_id")?),
            box_id: row.try_get::<Option<i64>, _>("box_id")?.map(BoxId::new),
        }))
    }
}

const INSERT: &str =
    "INSERT INTO items (code, description, equipment_id, box_id) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM items WHERE id = ?";
const UPDATE: &str =
    "UPDATE items SET code = ?, description = ?, equipment_id = ?, box_id = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM items WHERE id = ?";
const DETACH_FROM_BOX: &str = "UPDATE items SET box_id = NULL WHERE box_id = ?";
const COUNT_BY_EQUIPMENT: &str = "SELECT COUNT(*) FROM items WHERE equipment_id = ?";

/// `SQLite`-backed item repository.
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ItemRepository for SqliteItemRepository {
    fn create(&self, item: ItemPayload) -> impl Future<Output = Result<Item, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&item.code)
                .bind(&item.description)
                .bind(item.equipment_id.get())
                .bind(item.box_id.map(BoxId::get))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(item.into_item(ItemId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(&self, id: ItemId) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send {
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
        id: ItemId,
    ) -> impl Future<Output = Result<Option<ItemRow>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<ItemRowWrapper> = sqlx::query_as(ITEM_BY_ID.as_str())
                .bind(id.get())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn list_joined(
        &self,
        filter: ItemFilter,
    ) -> impl Future<Output = Result<Vec<ItemRow>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let box_id = filter.box_id.map(BoxId::get);
            let rows: Vec<ItemRowWrapper> = sqlx::query_as(ITEM_FILTERED.as_str())
                .bind(filter.storeless)
                .bind(box_id)
                .bind(box_id)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, item: Item) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&item.code)
                .bind(&item.description)
                .bind(item.equipment_id.get())
                .bind(item.box_id.map(BoxId::get))
                .bind(item.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(item))
        }
    }

    fn delete(&self, id: ItemId) -> impl Future<Output = Result<bool, DepotError>> + Send {
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

    fn detach_from_box(
        &self,
        box_id: BoxId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DETACH_FROM_BOX)
                .bind(box_id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }

    fn count_by_equipment(
        &self,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_EQUIPMENT)
                .bind(equipment_id.get())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(count.unsigned_abs())
        }
    }
}
