//! Application services — use-case implementations.
//!
//! Each service holds the [`Repositories`](crate::ports::Repositories) bundle
//! behind an `Arc` (constructor injection), keeping this layer decoupled
//! from concrete adapters. Mutations run in a fixed order: rights check,
//! payload validation, reference checks, then the repository call.

pub mod box_service;
pub mod equipment_service;
pub mod event_service;
pub mod fault_service;
pub mod item_service;
pub mod store_service;
pub mod user_service;

pub use box_service::BoxService;
pub use equipment_service::EquipmentService;
pub use event_service::EventService;
pub use fault_service::FaultService;
pub use item_service::ItemService;
pub use store_service::StoreService;
pub use user_service::UserService;
