//! Fault — a reported defect on an item, with a bounded status.
//!
//! Status validation is a range check only: any value between
//! [`FaultStatus::MIN`] and [`FaultStatus::MAX`] is accepted, regardless of
//! the fault's previous status. Transition rules (e.g. forbidding
//! `Fixed → New`) are intentionally not enforced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DepotError, ValidationError};
use crate::id::{FaultId, ItemId};
use crate::time::Timestamp;

/// Lifecycle status of a [`Fault`], serialized as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum FaultStatus {
    New,
    InProgress,
    Fixed,
    Unfixable,
}

impl FaultStatus {
    pub const MIN: Self = Self::New;
    pub const MAX: Self = Self::Unfixable;

    #[must_use]
    pub const fn ordinal(self) -> i64 {
        match self {
            Self::New => 0,
            Self::InProgress => 1,
            Self::Fixed => 2,
            Self::Unfixable => 3,
        }
    }

    /// Accept `raw` iff it lies within `[MIN, MAX]`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidInput`] with
    /// [`ValidationError::FaultStatusOutOfRange`] for any other value.
    pub fn validate(raw: i64) -> Result<Self, DepotError> {
        Self::try_from(raw).map_err(DepotError::from)
    }
}

impl TryFrom<i64> for FaultStatus {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::New),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Fixed),
            3 => Ok(Self::Unfixable),
            other => Err(ValidationError::FaultStatusOutOfRange(other)),
        }
    }
}

impl From<FaultStatus> for i64 {
    fn from(status: FaultStatus) -> Self {
        status.ordinal()
    }
}

impl fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::InProgress => f.write_str("in_progress"),
            Self::Fixed => f.write_str("fixed"),
            Self::Unfixable => f.write_str("unfixable"),
        }
    }
}

/// A reported defect on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub id: FaultId,
    /// Weak reference to the faulty [`Item`](crate::item::Item).
    pub item_id: ItemId,
    pub status: FaultStatus,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Unvalidated insert payload; `status` is the raw wire value.
#[derive(Debug, Clone, Deserialize)]
pub struct FaultPayload {
    pub item_id: ItemId,
    pub status: i64,
    #[serde(default)]
    pub description: String,
}

/// Partial update for a [`Fault`]; `status`, when given, is range-checked
/// like on insert.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaultPatch {
    pub item_id: Option<ItemId>,
    pub status: Option<i64>,
    pub description: Option<String>,
}

impl FaultPatch {
    #[must_use]
    pub fn apply(self, current: &Fault) -> FaultPayload {
        FaultPayload {
            item_id: self.item_id.unwrap_or(current.item_id),
            status: self.status.unwrap_or_else(|| current.status.ordinal()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
        }
    }
}

impl From<FaultPayload> for FaultPatch {
    fn from(payload: FaultPayload) -> Self {
        Self {
            item_id: Some(payload.item_id),
            status: Some(payload.status),
            description: Some(payload.description),
        }
    }
}

/// A fault report posted against an item identified by the path.
#[derive(Debug, Clone, Deserialize)]
pub struct FaultReport {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub description: String,
}

impl FaultReport {
    /// Bind the report to the item it was posted on.
    #[must_use]
    pub fn for_item(self, item_id: ItemId) -> FaultPayload {
        FaultPayload {
            item_id,
            status: self.status,
            description: self.description,
        }
    }
}

/// A fault payload whose status passed the range check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFault {
    pub item_id: ItemId,
    pub status: FaultStatus,
    pub description: String,
}

impl FaultPayload {
    /// Run the status range check, producing a [`NewFault`].
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidInput`] when `status` is out of range.
    pub fn validate(self) -> Result<NewFault, DepotError> {
        Ok(NewFault {
            item_id: self.item_id,
            status: FaultStatus::validate(self.status)?,
            description: self.description,
        })
    }
}

/// A fault listed together with the code of its item and the name of the
/// item's equipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaultSummary {
    pub fault: Fault,
    pub item_code: String,
    pub equipment_name: String,
}
