//! The [`Repositories`] bundle backed by one `SQLite` pool.

use sqlx::SqlitePool;

use depot_app::ports::Repositories;

use crate::box_repo::SqliteBoxRepository;
use crate::equipment_repo::SqliteEquipmentRepository;
use crate::event_repo::SqliteEventRepository;
use crate::fault_repo::SqliteFaultRepository;
use crate::item_repo::SqliteItemRepository;
use crate::store_repo::SqliteStoreRepository;
use crate::user_repo::SqliteUserRepository;

/// Every `SQLite` repository, sharing a single connection pool.
pub struct SqliteRepositories {
    users: SqliteUserRepository,
    stores: SqliteStoreRepository,
    boxes: SqliteBoxRepository,
    equipment: SqliteEquipmentRepository,
    items: SqliteItemRepository,
    faults: SqliteFaultRepository,
    events: SqliteEventRepository,
}

impl SqliteRepositories {
    /// Create the bundle over the given pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: SqliteUserRepository::new(pool.clone()),
            stores: SqliteStoreRepository::new(pool.clone()),
            boxes: SqliteBoxRepository::new(pool.clone()),
            equipment: SqliteEquipmentRepository::new(pool.clone()),
            items: SqliteItemRepository::new(pool.clone()),
            faults: SqliteFaultRepository::new(pool.clone()),
            events: SqliteEventRepository::new(pool),
        }
    }
}

impl Repositories for SqliteRepositories {
    type Users = SqliteUserRepository;
    type Stores = SqliteStoreRepository;
    type Boxes = SqliteBoxRepository;
    type Equipment = SqliteEquipmentRepository;
    type Items = SqliteItemRepository;
    type Faults = SqliteFaultRepository;
    type Events = SqliteEventRepository;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn stores(&self) -> &Self::Stores {
        &self.stores
    }

    fn boxes(&self) -> &Self::Boxes {
        &self.boxes
    }

    fn equipment(&self) -> &Self::Equipment {
        &self.equipment
    }

    fn items(&self) -> &Self::Items {
        &self.items
    }

    fn faults(&self) -> &Self::Faults {
        &self.faults
    }

    fn events(&self) -> &Self::Events {
        &self.events
    }
}
