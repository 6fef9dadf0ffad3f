//! # depot-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `depot-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows, including the joined
//!   box and item rows whose SELECT lists come from the projector's
//!   column tables
//!
//! ## Dependency rule
//! Depends on `depot-app` (for port traits) and `depot-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod codec;
mod joined;

pub mod box_repo;
pub mod equipment_repo;
pub mod error;
pub mod event_repo;
pub mod fault_repo;
pub mod item_repo;
pub mod pool;
pub mod repositories;
pub mod store_repo;
pub mod user_repo;

pub use pool::{Config, Database};
pub use repositories::SqliteRepositories;
