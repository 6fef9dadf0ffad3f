//! Equipment — a catalog template that physical items instantiate.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::EquipmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipmentPayload {
    pub name: String,
}

impl EquipmentPayload {
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `name` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("name", &self.name)
    }

    #[must_use]
    pub fn into_equipment(self, id: EquipmentId) -> Equipment {
        Equipment {
            id,
            name: self.name,
        }
    }
}

/// Partial update for an [`Equipment`] entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentPatch {
    pub name: Option<String>,
}

impl EquipmentPatch {
    #[must_use]
    pub fn apply(self, current: Equipment) -> EquipmentPayload {
        EquipmentPayload {
            name: self.name.unwrap_or(current.name),
        }
    }
}

impl From<EquipmentPayload> for EquipmentPatch {
    fn from(payload: EquipmentPayload) -> Self {
        Self {
            name: Some(payload.name),
        }
    }
}
