//! Joined queries generated from the projector's column tables.
//!
//! Every [`Part`] is bound to a fixed table alias; the SELECT list is the
//! shape's [`Column`] table rendered as `alias."field" AS column_alias`, and
//! rows are read back by column alias. Single-row and list queries share
//! one base statement.

use std::sync::LazyLock;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use depot_domain::id::{BoxId, EquipmentId, ItemId, StoreId, UserId};
use depot_domain::projection::{BoxRow, BoxView, Column, ItemRow, ItemView, JoinShape, Part};

use crate::codec::decode_right;

const fn table_alias(part: Part) -> &'static str {
    match part {
        Part::Item => "i",
        Part::Box => "b",
        Part::Store => "s",
        Part::Manager => "u",
        Part::Equipment => "e",
    }
}

fn select_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|column| {
            format!(
                "{}.\"{}\" AS {}",
                table_alias(column.part),
                column.field,
                column.alias
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

static BOX_BASE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM boxes b \
         LEFT JOIN stores s ON s.id = b.store_id \
         LEFT JOIN users u ON u.id = s.manager_id",
        select_list(BoxView::COLUMNS)
    )
});

pub(crate) static BOX_BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE b.id = ?", *BOX_BASE));

pub(crate) static BOX_ALL: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY b.id", *BOX_BASE));

static ITEM_BASE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {} FROM items i \
         LEFT JOIN boxes b ON b.id = i.box_id \
         LEFT JOIN stores s ON s.id = b.store_id \
         LEFT JOIN equipment e ON e.id = i.equipment_id",
        select_list(ItemView::COLUMNS)
    )
});

pub(crate) static ITEM_BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE i.id = ?", *ITEM_BASE));

/// Binds: `storeless` (0/1), then `box_id` twice.
pub(crate) static ITEM_FILTERED: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{} WHERE (? = 0 OR i.box_id IS NULL) AND (? IS NULL OR i.box_id = ?) ORDER BY i.id",
        *ITEM_BASE
    )
});

/// Wrapper for converting joined rows into [`BoxRow`].
pub(crate) struct BoxRowWrapper(pub(crate) BoxRow);

impl<'r> FromRow<'r, SqliteRow> for BoxRowWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let manager_right: Option<i64> = row.try_get("manager_right")?;
        Ok(Self(BoxRow {
            box_id: BoxId::new(row.try_get("box_id")?),
            box_code: row.try_get("box_code")?,
            box_description: row.try_get("box_description")?,
            box_store_id: row.try_get::<Option<i64>, _>("box_store_id")?.map(StoreId::new),
            store_id: row.try_get::<Option<i64>, _>("store_id")?.map(StoreId::new),
            store_name: row.try_get("store_name")?,
            store_address: row.try_get("store_address")?,
            store_manager_id: row
                .try_get::<Option<i64>, _>("store_manager_id")?
                .map(UserId::new),
            manager_id: row.try_get::<Option<i64>, _>("manager_id")?.map(UserId::new),
            manager_username: row.try_get("manager_username")?,
            manager_email: row.try_get("manager_email")?,
            manager_right: manager_right.map(decode_right).transpose()?,
        }))
    }
}

/// Wrapper for converting joined rows into [`ItemRow`].
pub(crate) struct ItemRowWrapper(pub(crate) ItemRow);

impl<'r> FromRow<'r, SqliteRow> for ItemRowWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(ItemRow {
            item_id: ItemId::new(row.try_get("item_id")?),
            item_code: row.try_get("item_code")?,
            item_description: row.try_get("item_description")?,
            item_equipment_id: EquipmentId::new(row.try_get("item_equipment_id")?),
            item_box_id: row.try_get::<Option<i64>, _>("item_box_id")?.map(BoxId::new),
            box_id: row.try_get::<Option<i64>, _>("box_id")?.map(BoxId::new),
            box_code: row.try_get("box_code")?,
            box_description: row.try_get("box_description")?,
            box_store_id: row.try_get::<Option<i64>, _>("box_store_id")?.map(StoreId::new),
            store_id: row.try_get::<Option<i64>, _>("store_id")?.map(StoreId::new),
            store_name: row.try_get("store_name")?,
            store_address: row.try_get("store_address")?,
            store_manager_id: row
                .try_get::<Option<i64>, _>("store_manager_id")?
                .map(UserId::new),
            equipment_id: row
                .try_get::<Option<i64>, _>("equipment_id")?
                .map(EquipmentId::new),
            equipment_name: row.try_get("equipment_name")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_every_column_of_the_box_shape() {
        for column in BoxView::COLUMNS {
            assert!(BOX_BY_ID.contains(&format!(" AS {}", column.alias)));
        }
        assert!(BOX_BY_ID.contains("u.\"right\" AS manager_right"));
    }

    #[test]
    fn should_share_base_statement_between_single_and_list_item_queries() {
        let base = ITEM_BY_ID.trim_end_matches(" WHERE i.id = ?");
        assert!(ITEM_FILTERED.starts_with(base));
    }
}
