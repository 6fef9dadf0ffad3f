//! Store — a physical storage location run by a managing user.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{StoreId, UserId};

/// A physical storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    /// Weak reference to the managing [`User`](crate::user::User).
    pub manager_id: UserId,
}

/// Insert payload for a [`Store`]. Identity comes from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct StorePayload {
    pub name: String,
    pub address: String,
    pub manager_id: UserId,
}

impl StorePayload {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] when `name` or `address` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("name", &self.name)?;
        crate::require_non_empty("address", &self.address)
    }

    /// Attach an identity, producing the stored form.
    #[must_use]
    pub fn into_store(self, id: StoreId) -> Store {
        Store {
            id,
            name: self.name,
            address: self.address,
            manager_id: self.manager_id,
        }
    }
}

/// Partial update for a [`Store`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub manager_id: Option<UserId>,
}

impl StorePatch {
    /// Merge onto `current`, producing the full payload to validate and store.
    #[must_use]
    pub fn apply(self, current: Store) -> StorePayload {
        StorePayload {
            name: self.name.unwrap_or(current.name),
            address: self.address.unwrap_or(current.address),
            manager_id: self.manager_id.unwrap_or(current.manager_id),
        }
    }
}

impl From<StorePayload> for StorePatch {
    fn from(payload: StorePayload) -> Self {
        Self {
            name: Some(payload.name),
            address: Some(payload.address),
            manager_id: Some(payload.manager_id),
        }
    }
}
