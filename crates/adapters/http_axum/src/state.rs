//! Shared application state for axum handlers.

use std::sync::Arc;

use depot_app::ports::{PasswordHasher, Repositories};
use depot_app::services::{
    BoxService, EquipmentService, EventService, FaultService, ItemService, StoreService,
    UserService,
};

use crate::auth::TokenManager;

/// Application state shared across all axum handlers.
///
/// Generic over the repository bundle and the password hasher to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone`; only the `Arc` wrappers
/// are cloned.
pub struct AppState<P, H> {
    pub stores: Arc<StoreService<P>>,
    pub boxes: Arc<BoxService<P>>,
    pub equipment: Arc<EquipmentService<P>>,
    pub items: Arc<ItemService<P>>,
    pub faults: Arc<FaultService<P>>,
    pub events: Arc<EventService<P>>,
    pub users: Arc<UserService<P, H>>,
    /// Bearer token issuer/verifier.
    pub tokens: Arc<TokenManager>,
}

impl<P, H> Clone for AppState<P, H> {
    fn clone(&self) -> Self {
        Self {
            stores: Arc::clone(&self.stores),
            boxes: Arc::clone(&self.boxes),
            equipment: Arc::clone(&self.equipment),
            items: Arc::clone(&self.items),
            faults: Arc::clone(&self.faults),
            events: Arc::clone(&self.events),
            users: Arc::clone(&self.users),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<P: Repositories, H: PasswordHasher> AppState<P, H> {
    /// Build every service over one shared repository bundle.
    pub fn new(repos: P, hasher: H, tokens: TokenManager) -> Self {
        let repos = Arc::new(repos);
        Self {
            stores: Arc::new(StoreService::new(Arc::clone(&repos))),
            boxes: Arc::new(BoxService::new(Arc::clone(&repos))),
            equipment: Arc::new(EquipmentService::new(Arc::clone(&repos))),
            items: Arc::new(ItemService::new(Arc::clone(&repos))),
            faults: Arc::new(FaultService::new(Arc::clone(&repos))),
            events: Arc::new(EventService::new(Arc::clone(&repos))),
            users: Arc::new(UserService::new(repos, Arc::new(hasher))),
            tokens: Arc::new(tokens),
        }
    }
}
