//! `SQLite` implementation of [`EquipmentRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use depot_app::ports::EquipmentRepository;
use depot_domain::equipment::{Equipment, EquipmentPayload};
use depot_domain::error::DepotError;
use depot_domain::id::EquipmentId;

use crate::error::StorageError;

struct Wrapper(Equipment);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Equipment {
            id: EquipmentId::new(row.try_get("id")?),
            name: row.try_get("name")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO equipment (name) VALUES (?)";
const SELECT_BY_ID: &str = "SELECT * FROM equipment WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM equipment ORDER BY id";
const UPDATE: &str = "UPDATE equipment SET name = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM equipment WHERE id = ?";

/// `SQLite`-backed equipment catalog.
pub struct SqliteEquipmentRepository {
    pool: SqlitePool,
}

impl SqliteEquipmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EquipmentRepository for SqliteEquipmentRepository {
    fn create(
        &self,
        equipment: EquipmentPayload,
    ) -> impl Future<Output = Result<Equipment, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&equipment.name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(equipment.into_equipment(EquipmentId::new(result.last_insert_rowid())))
        }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, DepotError>> + Send {
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
        equipment: Equipment,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&equipment.name)
                .bind(equipment.id.get())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok((result.rows_affected() > 0).then_some(equipment))
        }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, DepotError>> + Send {
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

    #[tokio::test]
    async fn should_create_rename_and_delete_equipment() {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        let repo = SqliteEquipmentRepository::new(db.pool().clone());

        let created = repo
            .create(EquipmentPayload {
                name: "Lantern".to_string(),
            })
            .await
            .unwrap();
        let renamed = Equipment {
            id: created.id,
            name: "Gas lantern".to_string(),
        };
        repo.update(renamed.clone()).await.unwrap().unwrap();
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(renamed));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
