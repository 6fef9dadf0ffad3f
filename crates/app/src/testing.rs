//! In-memory port fakes shared by the service tests.
//!
//! All repositories share one `State` so joined reads see the same rows a
//! LEFT JOIN would.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use depot_domain::equipment::{Equipment, EquipmentPayload};
use depot_domain::error::DepotError;
use depot_domain::event::{Event, EventPayload};
use depot_domain::fault::{Fault, NewFault};
use depot_domain::id::{BoxId, EquipmentId, EventId, FaultId, ItemId, StoreId, UserId};
use depot_domain::item::{Item, ItemFilter, ItemPayload};
use depot_domain::projection::{BoxRow, ItemRow};
use depot_domain::rights::Actor;
use depot_domain::storage_box::{BoxPayload, StorageBox};
use depot_domain::store::{Store, StorePayload};
use depot_domain::time::Timestamp;
use depot_domain::user::{NewUser, User, UserRight};

use crate::ports::{
    BoxRepository, EquipmentRepository, EventRepository, FaultRepository, ItemRepository,
    PasswordHasher, Repositories, StoreRepository, UserRepository,
};

#[derive(Default)]
struct State {
    last_id: i64,
    users: BTreeMap<UserId, (User, String)>,
    stores: BTreeMap<StoreId, Store>,
    boxes: BTreeMap<BoxId, StorageBox>,
    equipment: BTreeMap<EquipmentId, Equipment>,
    items: BTreeMap<ItemId, Item>,
    faults: BTreeMap<FaultId, Fault>,
    events: BTreeMap<EventId, Event>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn box_row(&self, storage_box: &StorageBox) -> BoxRow {
        let store = storage_box
            .store_id
            .and_then(|id| self.stores.get(&id));
        let manager = store.and_then(|s| self.users.get(&s.manager_id).map(|(u, _)| u));
        BoxRow {
            box_id: storage_box.id,
            box_code: storage_box.code.clone(),
            box_description: storage_box.description.clone(),
            box_store_id: storage_box.store_id,
            store_id: store.map(|s| s.id),
            store_name: store.map(|s| s.name.clone()),
            store_address: store.map(|s| s.address.clone()),
            store_manager_id: store.map(|s| s.manager_id),
            manager_id: manager.map(|u| u.id),
            manager_username: manager.map(|u| u.username.clone()),
            manager_email: manager.map(|u| u.email.clone()),
            manager_right: manager.map(|u| u.right),
        }
    }

    fn item_row(&self, item: &Item) -> ItemRow {
        let storage_box = item.box_id.and_then(|id| self.boxes.get(&id));
        let store = storage_box
            .and_then(|b| b.store_id)
            .and_then(|id| self.stores.get(&id));
        let equipment = self.equipment.get(&item.equipment_id);
        ItemRow {
            item_id: item.id,
            item_code: item.code.clone(),
            item_description: item.description.clone(),
            item_equipment_id: item.equipment_id,
            item_box_id: item.box_id,
            box_id: storage_box.map(|b| b.id),
            box_code: storage_box.map(|b| b.code.clone()),
            box_description: storage_box.map(|b| b.description.clone()),
            box_store_id: storage_box.and_then(|b| b.store_id),
            store_id: store.map(|s| s.id),
            store_name: store.map(|s| s.name.clone()),
            store_address: store.map(|s| s.address.clone()),
            store_manager_id: store.map(|s| s.manager_id),
            equipment_id: equipment.map(|e| e.id),
            equipment_name: equipment.map(|e| e.name.clone()),
        }
    }
}

type Shared = Arc<Mutex<State>>;

pub struct InMemoryUsers(Shared);
pub struct InMemoryStores(Shared);
pub struct InMemoryBoxes(Shared);
pub struct InMemoryEquipment(Shared);
pub struct InMemoryItems(Shared);
pub struct InMemoryFaults(Shared);
pub struct InMemoryEvents(Shared);

pub struct InMemoryRepositories {
    users: InMemoryUsers,
    stores: InMemoryStores,
    boxes: InMemoryBoxes,
    equipment: InMemoryEquipment,
    items: InMemoryItems,
    faults: InMemoryFaults,
    events: InMemoryEvents,
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        let state = Shared::default();
        Self {
            users: InMemoryUsers(Arc::clone(&state)),
            stores: InMemoryStores(Arc::clone(&state)),
            boxes: InMemoryBoxes(Arc::clone(&state)),
            equipment: InMemoryEquipment(Arc::clone(&state)),
            items: InMemoryItems(Arc::clone(&state)),
            faults: InMemoryFaults(Arc::clone(&state)),
            events: InMemoryEvents(state),
        }
    }
}

impl Repositories for InMemoryRepositories {
    type Users = InMemoryUsers;
    type Stores = InMemoryStores;
    type Boxes = InMemoryBoxes;
    type Equipment = InMemoryEquipment;
    type Items = InMemoryItems;
    type Faults = InMemoryFaults;
    type Events = InMemoryEvents;

    fn users(&self) -> &InMemoryUsers {
        &self.users
    }
    fn stores(&self) -> &InMemoryStores {
        &self.stores
    }
    fn boxes(&self) -> &InMemoryBoxes {
        &self.boxes
    }
    fn equipment(&self) -> &InMemoryEquipment {
        &self.equipment
    }
    fn items(&self) -> &InMemoryItems {
        &self.items
    }
    fn faults(&self) -> &InMemoryFaults {
        &self.faults
    }
    fn events(&self) -> &InMemoryEvents {
        &self.events
    }
}

impl UserRepository for InMemoryUsers {
    fn create(
        &self,
        user: &NewUser,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let user = User {
            id: UserId::new(state.next_id()),
            username: user.username.clone(),
            email: user.email.clone(),
            right: user.right,
        };
        state
            .users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        async { Ok(user) }
    }

    fn get_by_id(&self, id: UserId) -> impl Future<Output = Result<Option<User>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result = state.users.get(&id).map(|(u, _)| u.clone());
        async { Ok(result) }
    }

    fn find_credentials(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<(User, String)>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result = state
            .users
            .values()
            .find(|(u, _)| u.username == username)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<User>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result: Vec<User> = state.users.values().map(|(u, _)| u.clone()).collect();
        async { Ok(result) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().users.remove(&id).is_some();
        async move { Ok(removed) }
    }
}

impl StoreRepository for InMemoryStores {
    fn create(&self, store: StorePayload) -> impl Future<Output = Result<Store, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let store = store.into_store(StoreId::new(state.next_id()));
        state.stores.insert(store.id, store.clone());
        async { Ok(store) }
    }

    fn get_by_id(
        &self,
        id: StoreId,
    ) -> impl Future<Output = Result<Option<Store>, DepotError>> + Send {
        let result = self.0.lock().unwrap().stores.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Store>, DepotError>> + Send {
        let result: Vec<Store> = self.0.lock().unwrap().stores.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        store: Store,
    ) -> impl Future<Output = Result<Option<Store>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.stores.get_mut(&store.id).map(|slot| {
            *slot = store.clone();
            store
        });
        async { Ok(result) }
    }

    fn delete(&self, id: StoreId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().stores.remove(&id).is_some();
        async move { Ok(removed) }
    }
}

impl BoxRepository for InMemoryBoxes {
    fn create(
        &self,
        storage_box: BoxPayload,
    ) -> impl Future<Output = Result<StorageBox, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let storage_box = storage_box.into_box(BoxId::new(state.next_id()));
        state.boxes.insert(storage_box.id, storage_box.clone());
        async { Ok(storage_box) }
    }

    fn get_by_id(
        &self,
        id: BoxId,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send {
        let result = self.0.lock().unwrap().boxes.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_joined(
        &self,
        id: BoxId,
    ) -> impl Future<Output = Result<Option<BoxRow>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result = state.boxes.get(&id).map(|b| state.box_row(b));
        async { Ok(result) }
    }

    fn list_joined(&self) -> impl Future<Output = Result<Vec<BoxRow>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result: Vec<BoxRow> = state.boxes.values().map(|b| state.box_row(b)).collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        storage_box: StorageBox,
    ) -> impl Future<Output = Result<Option<StorageBox>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.boxes.get_mut(&storage_box.id).map(|slot| {
            *slot = storage_box.clone();
            storage_box
        });
        async { Ok(result) }
    }

    fn delete(&self, id: BoxId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().boxes.remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn detach_from_store(
        &self,
        store_id: StoreId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let mut count = 0;
        for storage_box in state.boxes.values_mut() {
            if storage_box.store_id == Some(store_id) {
                storage_box.store_id = None;
                count += 1;
            }
        }
        async move { Ok(count) }
    }
}

impl EquipmentRepository for InMemoryEquipment {
    fn create(
        &self,
        equipment: EquipmentPayload,
    ) -> impl Future<Output = Result<Equipment, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let equipment = equipment.into_equipment(EquipmentId::new(state.next_id()));
        state.equipment.insert(equipment.id, equipment.clone());
        async { Ok(equipment) }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send {
        let result = self.0.lock().unwrap().equipment.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, DepotError>> + Send {
        let result: Vec<Equipment> = self.0.lock().unwrap().equipment.values().cloned().collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Option<Equipment>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.equipment.get_mut(&equipment.id).map(|slot| {
            *slot = equipment.clone();
            equipment
        });
        async { Ok(result) }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().equipment.remove(&id).is_some();
        async move { Ok(removed) }
    }
}

impl ItemRepository for InMemoryItems {
    fn create(&self, item: ItemPayload) -> impl Future<Output = Result<Item, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let item = item.into_item(ItemId::new(state.next_id()));
        state.items.insert(item.id, item.clone());
        async { Ok(item) }
    }

    fn get_by_id(&self, id: ItemId) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send {
        let result = self.0.lock().unwrap().items.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_joined(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<ItemRow>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result = state.items.get(&id).map(|i| state.item_row(i));
        async { Ok(result) }
    }

    fn list_joined(
        &self,
        filter: ItemFilter,
    ) -> impl Future<Output = Result<Vec<ItemRow>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result: Vec<ItemRow> = state
            .items
            .values()
            .filter(|i| filter.matches(i))
            .map(|i| state.item_row(i))
            .collect();
        async { Ok(result) }
    }

    fn update(&self, item: Item) -> impl Future<Output = Result<Option<Item>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.items.get_mut(&item.id).map(|slot| {
            *slot = item.clone();
            item
        });
        async { Ok(result) }
    }

    fn delete(&self, id: ItemId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().items.remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn detach_from_box(
        &self,
        box_id: BoxId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let mut count = 0;
        for item in state.items.values_mut() {
            if item.box_id == Some(box_id) {
                item.box_id = None;
                count += 1;
            }
        }
        async move { Ok(count) }
    }

    fn count_by_equipment(
        &self,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let count = state
            .items
            .values()
            .filter(|i| i.equipment_id == equipment_id)
            .count() as u64;
        async move { Ok(count) }
    }
}

impl FaultRepository for InMemoryFaults {
    fn create(
        &self,
        fault: NewFault,
        at: Timestamp,
    ) -> impl Future<Output = Result<Fault, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let fault = Fault {
            id: FaultId::new(state.next_id()),
            item_id: fault.item_id,
            status: fault.status,
            description: fault.description,
            created_at: at,
            updated_at: at,
        };
        state.faults.insert(fault.id, fault.clone());
        async { Ok(fault) }
    }

    fn get_by_id(
        &self,
        id: FaultId,
    ) -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send {
        let result = self.0.lock().unwrap().faults.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send {
        let result: Vec<Fault> = self.0.lock().unwrap().faults.values().cloned().collect();
        async { Ok(result) }
    }

    fn find_by_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<Vec<Fault>, DepotError>> + Send {
        let state = self.0.lock().unwrap();
        let result: Vec<Fault> = state
            .faults
            .values()
            .filter(|f| f.item_id == item_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(
        &self,
        fault: Fault,
    ) -> impl Future<Output = Result<Option<Fault>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.faults.get_mut(&fault.id).map(|slot| {
            *slot = fault.clone();
            fault
        });
        async { Ok(result) }
    }

    fn delete(&self, id: FaultId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().faults.remove(&id).is_some();
        async move { Ok(removed) }
    }

    fn delete_by_item(
        &self,
        item_id: ItemId,
    ) -> impl Future<Output = Result<u64, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let before = state.faults.len();
        state.faults.retain(|_, f| f.item_id != item_id);
        let count = (before - state.faults.len()) as u64;
        async move { Ok(count) }
    }
}

impl EventRepository for InMemoryEvents {
    fn create(
        &self,
        event: EventPayload,
    ) -> impl Future<Output = Result<Event, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let event = event.into_event(EventId::new(state.next_id()));
        state.events.insert(event.id, event.clone());
        async { Ok(event) }
    }

    fn get_by_id(
        &self,
        id: EventId,
    ) -> impl Future<Output = Result<Option<Event>, DepotError>> + Send {
        let result = self.0.lock().unwrap().events.get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Event>, DepotError>> + Send {
        let mut result: Vec<Event> = self.0.lock().unwrap().events.values().cloned().collect();
        result.sort_by_key(|e| (e.start, e.id));
        async { Ok(result) }
    }

    fn update(
        &self,
        event: Event,
    ) -> impl Future<Output = Result<Option<Event>, DepotError>> + Send {
        let mut state = self.0.lock().unwrap();
        let result = state.events.get_mut(&event.id).map(|slot| {
            *slot = event.clone();
            event
        });
        async { Ok(result) }
    }

    fn delete(&self, id: EventId) -> impl Future<Output = Result<bool, DepotError>> + Send {
        let removed = self.0.lock().unwrap().events.remove(&id).is_some();
        async move { Ok(removed) }
    }
}

/// Reversible stand-in for a real hash, good enough to tell values apart.
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, DepotError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DepotError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

pub fn repos() -> Arc<InMemoryRepositories> {
    Arc::new(InMemoryRepositories::default())
}

pub fn actor(right: UserRight) -> Actor {
    Actor::User {
        id: UserId::new(1),
        right,
    }
}

pub fn admin() -> Actor {
    actor(UserRight::Admin)
}

pub fn member() -> Actor {
    actor(UserRight::Member)
}

pub fn guest() -> Actor {
    actor(UserRight::Guest)
}

/// Seed a user directly, bypassing rights and hashing.
pub async fn seed_user(repos: &InMemoryRepositories, username: &str, right: UserRight) -> User {
    let payload = NewUser {
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password: "secret".to_string(),
        right,
    };
    repos
        .users()
        .create(&payload, "hashed:secret")
        .await
        .unwrap()
}
