use serde::Serialize;

use super::{Column, JoinShape, Part, resolve};
use crate::error::DepotError;
use crate::id::{BoxId, StoreId, UserId};
use crate::storage_box::StorageBox;
use crate::store::Store;
use crate::user::{User, UserRight};

/// A box together with its store and the store's manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxView {
    #[serde(rename = "box")]
    pub storage_box: StorageBox,
    pub store: Option<Store>,
    pub manager: Option<User>,
}

/// `boxes ⟕ stores ⟕ users` as one flat record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxRow {
    pub box_id: BoxId,
    pub box_code: String,
    pub box_description: String,
    pub box_store_id: Option<StoreId>,
    pub store_id: Option<StoreId>,
    pub store_name: Option<String>,
    pub store_address: Option<String>,
    pub store_manager_id: Option<UserId>,
    pub manager_id: Option<UserId>,
    pub manager_username: Option<String>,
    pub manager_email: Option<String>,
    pub manager_right: Option<UserRight>,
}

impl JoinShape for BoxView {
    type Row = BoxRow;

    const COLUMNS: &'static [Column] = &[
        Column::new("box_id", Part::Box, "id"),
        Column::new("box_code", Part::Box, "code"),
        Column::new("box_description", Part::Box, "description"),
        Column::new("box_store_id", Part::Box, "store_id"),
        Column::new("store_id", Part::Store, "id"),
        Column::new("store_name", Part::Store, "name"),
        Column::new("store_address", Part::Store, "address"),
        Column::new("store_manager_id", Part::Store, "manager_id"),
        Column::new("manager_id", Part::Manager, "id"),
        Column::new("manager_username", Part::Manager, "username"),
        Column::new("manager_email", Part::Manager, "email"),
        Column::new("manager_right", Part::Manager, "right"),
    ];

    fn flatten(&self) -> BoxRow {
        let store = self.store.as_ref();
        let manager = self.manager.as_ref();
        BoxRow {
            box_id: self.storage_box.id,
            box_code: self.storage_box.code.clone(),
            box_description: self.storage_box.description.clone(),
            box_store_id: self.storage_box.store_id,
            store_id: store.map(|s| s.id),
            store_name: store.map(|s| s.name.clone()),
            store_address: store.map(|s| s.address.clone()),
            store_manager_id: store.map(|s| s.manager_id),
            manager_id: manager.map(|u| u.id),
            manager_username: manager.map(|u| u.username.clone()),
            manager_email: manager.map(|u| u.email.clone()),
            manager_right: manager.map(|u| u.right),
        }
    }

    fn unflatten(row: BoxRow) -> Result<Self, DepotError> {
        let storage_box = StorageBox {
            id: row.box_id,
            code: row.box_code,
            description: row.box_description,
            store_id: row.box_store_id,
        };

        let Some(wanted_store) = storage_box.store_id else {
            return Ok(Self {
                storage_box,
                store: None,
                manager: None,
            });
        };

        let store = match (
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
        let store = resolve(store, "Store", wanted_store)?;

        let manager = match (
            row.manager_id,
            row.manager_username,
            row.manager_email,
            row.manager_right,
        ) {
            (Some(id), Some(username), Some(email), Some(right)) => Some(User {
                id,
                username,
                email,
                right,
            }),
            _ => None,
        };
        let manager = resolve(manager, "User", store.manager_id)?;

        Ok(Self {
            storage_box,
            store: Some(store),
            manager: Some(manager),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFoundError;
    use crate::projection::project_all;

    fn stored_view() -> BoxView {
        BoxView {
            storage_box: StorageBox {
                id: BoxId::new(3),
                code: "B-03".to_string(),
                description: "ropes".to_string(),
                store_id: Some(StoreId::new(2)),
            },
            store: Some(Store {
                id: StoreId::new(2),
                name: "Basement".to_string(),
                address: "Main St 1".to_string(),
                manager_id: UserId::new(5),
            }),
            manager: Some(User {
                id: UserId::new(5),
                username: "carol".to_string(),
                email: "carol@example.org".to_string(),
                right: UserRight::Member,
            }),
        }
    }

    fn storeless_view(id: i64) -> BoxView {
        BoxView {
            storage_box: StorageBox {
                id: BoxId::new(id),
                code: format!("B-{id:02}"),
                description: String::new(),
                store_id: None,
            },
            store: None,
            manager: None,
        }
    }

    #[test]
    fn should_roundtrip_stored_box() {
        let view = stored_view();
        assert_eq!(BoxView::unflatten(view.flatten()).unwrap(), view);
    }

    #[test]
    fn should_roundtrip_storeless_box() {
        let view = storeless_view(1);
        assert_eq!(BoxView::unflatten(view.flatten()).unwrap(), view);
    }

    #[test]
    fn should_fail_when_store_manager_was_deleted() {
        let mut row = stored_view().flatten();
        row.manager_id = None;
        row.manager_username = None;
        row.manager_email = None;
        row.manager_right = None;

        let err = BoxView::unflatten(row).unwrap_err();
        assert!(matches!(
            err,
            DepotError::NotFound(NotFoundError { entity: "User", ref id }) if id == "5"
        ));
    }

    #[test]
    fn should_fail_when_store_was_deleted() {
        let mut row = stored_view().flatten();
        row.store_id = None;
        row.store_name = None;
        row.store_address = None;
        row.store_manager_id = None;

        let err = BoxView::unflatten(row).unwrap_err();
        assert!(matches!(
            err,
            DepotError::NotFound(NotFoundError { entity: "Store", .. })
        ));
    }

    #[test]
    fn should_preserve_order_and_length_of_rows() {
        let views = vec![storeless_view(9), stored_view(), storeless_view(1)];
        let rows: Vec<_> = views.iter().map(BoxView::flatten).collect();
        let projected = project_all::<BoxView>(rows).unwrap();
        assert_eq!(projected, views);
    }

    #[test]
    fn should_abort_whole_list_on_one_dangling_row() {
        let mut broken = stored_view().flatten();
        broken.manager_id = None;
        let rows = vec![storeless_view(1).flatten(), broken];
        assert!(project_all::<BoxView>(rows).is_err());
    }

    #[test]
    fn should_serialize_manager_without_password() {
        let json = serde_json::to_value(stored_view()).unwrap();
        assert_eq!(json["box"]["code"], "B-03");
        assert_eq!(json["manager"]["username"], "carol");
        assert!(json["manager"].get("password").is_none());
    }
}
