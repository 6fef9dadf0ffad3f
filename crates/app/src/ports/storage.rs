//! Storage port — repository traits for persistence.
//!
//! Identities are assigned by the store on `create`. `update` and `delete`
//! report a missing row as `None` / `false` and leave the decision to the
//! service. Joined reads return flat rows; projection happens in the
//! service through [`depot_domain::projection`].

use std::future::Future;

use depot_domain::equipment::{Equipment, EquipmentPayload};
use depot_domain::error::DepotError;
use depot_domain::event::{Event, EventPayload};
use depot_domain::fault::{Fault, NewFault};
use depot_domain::id::{BoxId, EquipmentId, EventId, FaultId, ItemId, StoreId, UserId};
use depot_domain::item::{Item, ItemFilter, ItemPayload};
use depot_domain::projection::{BoxRow, ItemRow};
use depot_domain::storage_box::{BoxPayload, StorageBox};
use depot_domain::store::{Store, StorePayload};
use depot_domain::time::Timestamp;
use depot_domain::user::{NewUser, User};

/// Persistence for [`User`] accounts and their password hashes.
pub trait UserRepository: Send + Sync {
    /// Persist a new user with an already hashed password.
    fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, DepotError>> + Send;

    fn get_by_id(&self, id: UserId) -> impl Future<Output = Result<Option<User>, DepotError>> + Send;

    /// Look up a user by name together with its stored password hash.
    fn find_credentials(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<(User, String)>, DepotError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DepotError>> + Send;

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, DepotError>> + Send;
}

pub trait StoreRepository: Send + Sync {
    fn create(&self, store: StorePayload) -> impl Future<Output = Result<Store, DepotError>> + Send;

    fn get_by_id(&self, id: StoreId)
    -> impl Future<Output = Result<Option<Store>, DepotError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Store>, DepotError>> + Send;

    fn update(&self, store: Store) -> impl Future<Output = Result<Option<Store>, DepotError>> + Send;

    fn delete(&self, id: StoreId) -> impl Future<Output = Result<bool, DepotError>> + Send;
}

pub trait BoxRepository: Send + Sync {
    fn create(
        &self,
        storage_box: BoxPayload,
    ) -> impl Future<Output = Result<StorageBox, DepotError>> + Send;

    fn get_by_id(
        &self,
        id: BoxId,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send;

    /// The box joined with its store and the store's manager.
    fn get_joined(&self, id: BoxId)
    -> impl Future<Output = Result<Option<BoxRow>, DepotError>> + Send;

    /// Every box joined with its store and manager, ascending by id.
    fn list_joined(&self) -> impl Future<Output = Result<Vec<BoxRow>, DepotError>> + Send;

    fn update(
        &self,
        storage_box: StorageBox,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send;

    fn delete(&self, id: BoxId) -> impl Future<Output = Result<bool, DepotError>> + Send;

    /// Clear `store_id` on every box of `store_id`; returns the count.
    fn detach_from_store(
        &self,
        store_id: StoreId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send;
}

pub trait EquipmentRepository: Send + Sync {
    fn create(
        &self,
        equipment: EquipmentPayload,
    ) -> impl Future<Output = Result<Equipment, DepotError>> + Send;

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, DepotError>> + Send;

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send;

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, DepotError>> + Send;
}

pub trait ItemRepository: Send + Sync {
    fn create(&self, item: ItemPayload) -> impl Future<Output = Result<Item, DepotError>> + Send;

    fn get_by_id(&self, id: ItemId) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send;

    /// The item joined with its box, store and equipment.
    fn get_joined(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<ItemRow>, DepotError>> + Send;

    /// Joined rows of the items matching `filter`, ascending by id.
    fn list_joined(
        &self,
        filter: ItemFilter,
    ) -> impl Future<Output = Result<Vec<ItemRow>, DepotError>> + Send;

    fn update(&self, item: Item) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send;

    fn delete(&self, id: ItemId) -> impl Future<Output = Result<bool, DepotError>> + Send;

    /// Clear `box_id` on every item of `box_id`; returns the count.
    fn detach_from_box(&self, box_id: BoxId)
    -> impl Future<Output = Result<u64, DepotError>> + Send;

    /// Number of items instantiating `equipment_id`.
    fn count_by_equipment(
        &self,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send;
}

pub trait FaultRepository: Send + Sync {
    /// Persist a validated fault, stamping both timestamps with `at`.
    fn create(
        &self,
        fault: NewFault,
        at: Timestamp,
    ) -> impl Future<Output = Result<Fault, DepotError>> + Send;

    fn get_by_id(&self, id: FaultId)
    -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send;

    fn find_by_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send;

    fn update(&self, fault: Fault) -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send;

    fn delete(&self, id: FaultId) -> impl Future<Output = Result<bool, DepotError>> + Send;

    /// Remove every fault reported on `item_id`; returns the count.
    fn delete_by_item(&self, item_id: ItemId)
    -> impl Future<Output = Result<u64, DepotError>> + Send;
}

/// Persistence for [`Event`]s. Participants are stored with their event
/// and replaced wholesale on update.
pub trait EventRepository: Send + Sync {
    fn create(&self, event: EventPayload) -> impl Future<Output = Result<Event, DepotError>> + Send;

    fn get_by_id(&self, id: EventId)
    -> impl Future<Output = Result<Option<Event>, DepotError>> + Send;

    /// Every event, ascending by start then id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, DepotError>> + Send;

    fn update(&self, event: Event) -> impl Future<Output = Result<Option<Event>, DepotError>> + Send;

    /// Remove the event and its participant records.
    fn delete(&self, id: EventId) -> impl Future<Output = Result<bool, DepotError>> + Send;
}

/// The full set of repositories a storage adapter provides.
pub trait Repositories: Send + Sync + 'static {
    type Users: UserRepository;
    type Stores: StoreRepository;
    type Boxes: BoxRepository;
    type Equipment: EquipmentRepository;
    type Items: ItemRepository;
    type Faults: FaultRepository;
    type Events: EventRepository;

    fn users(&self) -> &Self::Users;
    fn stores(&self) -> &Self::Stores;
    fn boxes(&self) -> &Self::Boxes;
    fn equipment(&self) -> &Self::Equipment;
    fn items(&self) -> &Self::Items;
    fn faults(&self) -> &Self::Faults;
    fn events(&self) -> &Self::Events;
}
