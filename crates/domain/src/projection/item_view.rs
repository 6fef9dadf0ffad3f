use serde::Serialize;

use super::{Column, JoinShape, Part, resolve};
use crate::equipment::Equipment;
use crate::error::DepotError;
use crate::id::{BoxId, EquipmentId, ItemId, StoreId, UserId};
use crate::item::Item;
use crate::storage_box::StorageBox;
use crate::store::Store;

/// An item together with its box, the box's store and its equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub item: Item,
    #[serde(rename = "box")]
    pub storage_box: Option<StorageBox>,
    pub store: Option<Store>,
    pub equipment: Equipment,
}

/// `items ⟕ boxes ⟕ stores ⟕ equipment` as one flat record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub item_code: String,
    pub item_description: String,
    pub item_equipment_id: EquipmentId,
    pub item_box_id: Option<BoxId>,
    pub box_id: Option<BoxId>,
    pub box_code: Option<String>,
    pub box_description: Option<String>,
    pub box_store_id: Option<StoreId>,
    pub store_id: Option<StoreId>,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_manager_id: Option<UserId>,
    pub equipment_id: Option<EquipmentId>,
    pub equipment_name: Option<String>,
}

impl JoinShape for ItemView {
    type Row = ItemRow;

    const COLUMNS: &'static [Column] = &[
        Column::new("item_id", Part::Item, "id"),
        Column::new("item_code", Part::Item, "code"),
        Column::new("item_description", Part::Item, "description"),
        Column::new("item_equipment_id", Part::Item, "equipment_id"),
        Column::new("item_box_id", Part::Item, "box_id"),
        Column::new("box_id", Part::Box, "id"),
        Column::new("box_code", Part::Box, "code"),
        Column::new("box_description", Part::Box, "description"),
        Column::new("box_store_id", Part::Box, "store_id"),
        Column::new("store_id", Part::Store, "id"),
        Column::new("store_name", Part::Store, "name"),
        Column::new("store_address", Part::Store, "address"),
        Column::new("store_manager_id", Part::Store, "manager_id"),
        Column::new("equipment_id", Part::Equipment, "id"),
        Column::new("equipment_name", Part::Equipment, "name"),
    ];

    fn flatten(&self) -> ItemRow {
        let storage_box = self.storage_box.as_ref();
        let store = self.store.as_ref();
        ItemRow {
            item_id: self.item.id,
            item_code: self.item.code.clone(),
            item_description: self.item.description.clone(),
            item_equipment_id: self.item.equipment_id,
            item_box_id: self.item.box_id,
            box_id: storage_box.map(|b| b.id),
            box_code: storage_box.map(|b| b.code.clone()),
            box_description: storage_box.map(|b| b.description.clone()),
            box_store_id: storage_box.and_then(|b| b.store_id),
            store_id: store.map(|s| s.id),
            store_name: store.map(|s| s.name.clone()),
            store_address: store.map(|s| s.address.clone()),
            store_manager_id: store.map(|s| s.manager_id),
            equipment_id: Some(self.equipment.id),
            equipment_name: Some(self.equipment.name.clone()),
        }
    }

    fn unflatten(row: ItemRow) -> Result<Self, DepotError> {
        let item = Item {
            id: row.item_id,
            code: row.item_code,
            description: row.item_description,
            equipment_id: row.item_equipment_id,
            box_id: row.item_box_id,
        };

        let equipment = match (row.equipment_id, row.equipment_name) {
            (Some(id), Some(name)) => Some(Equipment { id, name }),
            _ => None,
        };
        let equipment = resolve(equipment, "Equipment", item.equipment_id)?;

        let storage_box = match item.box_id {
            None => None,
            Some(wanted) => {
                let found = match (row.box_id, row.box_code, row.box_description) {
                    (Some(id), Some(code), Some(description)) => Some(StorageBox {
                        id,
                        code,
                        description,
                        store_id: row.box_store_id,
                    }),
                    _ => None,
                };
                Some(resolve(found, "Box", wanted)?)
            }
        };

        let store = match storage_box.as_ref().and_then(|b| b.store_id) {
            None => None,
            Some(wanted) => {
                let found = match (
                    row.store_id,
                    row.store_name,
                    row.store_address,
                    row.store_manager_id,
                ) {
                    (Some(id), Some(name), Some(address), Some(manager_id)) => Some(Store {
                        id,
                        name,
                        address,
                        manager_id,
                    }),
                    _ => None,
                };
                Some(resolve(found, "Store", wanted)?)
            }
        };

        Ok(Self {
            item,
            storage_box,
            store,
            equipment,
        })
    }
}
