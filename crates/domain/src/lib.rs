//! # depot-domain
//!
//! Pure domain model for the depot inventory and event backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define the normalized **entities**: stores, boxes, equipment, items,
//!   faults, events and users
//! - Define the **rights model** (ordered user rights, per-operation minimums)
//! - Define the **fault status** range check
//! - Define the **join projector** that maps flat joined rows to nested
//!   views and back
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod equipment;
pub mod event;
pub mod fault;
pub mod item;
pub mod patch;
pub mod projection;
pub mod rights;
pub mod storage_box;
pub mod store;
pub mod user;

pub(crate) fn require_non_empty(
    field: &'static str,
    value: &str,
) -> Result<(), error::ValidationError> {
    if value.trim().is_empty() {
        return Err(error::ValidationError::EmptyField(field));
    }
    Ok(())
}
