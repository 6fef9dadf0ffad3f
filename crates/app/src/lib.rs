//! # depot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - one repository per entity (`StoreRepository`, `BoxRepository`, ...)
//!     bundled behind [`ports::Repositories`]
//!   - `PasswordHasher` — one-way password hashing
//! - Define **driving/inbound ports** as use-case structs, one per entity:
//!   rights check, payload validation, reference checks, cascade policy,
//!   and join projection for the box and item views
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `depot-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
