//! Item — a physical instance of an equipment entry, optionally boxed.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{BoxId, EquipmentId, ItemId};

/// A physical, labelled instance of an [`Equipment`](crate::equipment::Equipment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub code: String,
    pub description: String,
    /// Weak reference to the catalog entry this item instantiates.
    pub equipment_id: EquipmentId,
    /// Weak reference to the containing box; `None` when storeless.
    pub box_id: Option<BoxId>,
}

/// Insert payload for an [`Item`]; also the merged form of an [`ItemPatch`].
#[derive(Debug, Clone, Deserialize)]
pub struct ItemPayload {
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub equipment_id: EquipmentId,
    #[serde(default)]
    pub box_id: Option<BoxId>,
}

impl ItemPayload {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `code` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("code", &self.code)
    }

    #[must_use]
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            code: self.code,
            description: self.description,
            equipment_id: self.equipment_id,
            box_id: self.box_id,
        }
    }
}

/// Partial update for an [`Item`]. Absent fields keep their stored value;
/// `"box_id": null` takes the item out of its box.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    pub code: Option<String>,
    pub description: Option<String>,
    pub equipment_id: Option<EquipmentId>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub box_id: Option<Option<BoxId>>,
}

impl ItemPatch {
    /// Merge onto `current`, producing the full payload to validate and store.
    #[must_use]
    pub fn apply(self, current: Item) -> ItemPayload {
        ItemPayload {
            code: self.code.unwrap_or(current.code),
            description: self.description.unwrap_or(current.description),
            equipment_id: self.equipment_id.unwrap_or(current.equipment_id),
            box_id: self.box_id.unwrap_or(current.box_id),
        }
    }
}

impl From<ItemPayload> for ItemPatch {
    fn from(payload: ItemPayload) -> Self {
        Self {
            code: Some(payload.code),
            description: Some(payload.description),
            equipment_id: Some(payload.equipment_id),
            box_id: Some(payload.box_id),
        }
    }
}

/// Predicate over items used by filtered listings.
///
/// Every field narrows the result; the default filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    /// Only items whose `box_id` is unset.
    pub storeless: bool,
    /// Only items inside this box.
    pub box_id: Option<BoxId>,
}

impl ItemFilter {
    /// Filter selecting storeless items.
    #[must_use]
    pub const fn storeless() -> Self {
        Self {
            storeless: true,
            box_id: None,
        }
    }

    /// Filter selecting the contents of one box.
    #[must_use]
    pub const fn in_box(box_id: BoxId) -> Self {
        Self {
            storeless: false,
            box_id: Some(box_id),
        }
    }

    /// Whether `item` satisfies every constraint of this filter.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.storeless && item.box_id.is_some() {
            return false;
        }
        match self.box_id {
            Some(box_id) => item.box_id == Some(box_id),
            None => true,
        }
    }
}
