//! Storage box — a labelled container, optionally placed in a store.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{BoxId, StoreId};

/// A labelled container holding items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBox {
    pub id: BoxId,
    pub code: String,
    pub description: String,
    /// Weak reference to the [`Store`](crate::store::Store); `None` when storeless.
    pub store_id: Option<StoreId>,
}

/// Insert payload for a [`StorageBox`]; also the merged form of a [`BoxPatch`].
#[derive(Debug, Clone, Deserialize)]
pub struct BoxPayload {
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub store_id: Option<StoreId>,
}

impl BoxPayload {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `code` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("code", &self.code)
    }

    #[must_use]
    pub fn into_box(self, id: BoxId) -> StorageBox {
        StorageBox {
            id,
            code: self.code,
            description: self.description,
            store_id: self.store_id,
        }
    }
}

/// Partial update for a [`StorageBox`]. `"store_id": null` makes the box
/// storeless; an absent key keeps its store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoxPatch {
    pub code: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub store_id: Option<Option<StoreId>>,
}

impl BoxPatch {
    #[must_use]
    pub fn apply(self, current: StorageBox) -> BoxPayload {
        BoxPayload {
            code: self.code.unwrap_or(current.code),
            description: self.description.unwrap_or(current.description),
            store_id: self.store_id.unwrap_or(current.store_id),
        }
    }
}

impl From<BoxPayload> for BoxPatch {
    fn from(payload: BoxPayload) -> Self {
        Self {
            code: Some(payload.code),
            description: Some(payload.description),
            store_id: Some(payload.store_id),
        }
    }
}
