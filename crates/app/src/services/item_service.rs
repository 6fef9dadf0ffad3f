//! Item service — use-cases for physical items and their joined views.

use std::sync::Arc;

use depot_domain::error::{DepotError, NotFoundError};
use depot_domain::fault::Fault;
use depot_domain::id::ItemId;
use depot_domain::item::{Item, ItemFilter, ItemPatch, ItemPayload};
use depot_domain::projection::{ItemView, JoinShape, project_all};
use depot_domain::rights::{Actor, Operation, authorize};

use crate::ports::{
    BoxRepository, EquipmentRepository, FaultRepository, ItemRepository, Repositories,
};

/// Application service for items.
pub struct ItemService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> ItemService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Create an item of an existing equipment, optionally boxed.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] for a blank code,
    /// [`DepotError::NotFound`] when the equipment or box does not exist, or
    /// a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(&self, actor: &Actor, payload: ItemPayload) -> Result<Item, DepotError> {
        authorize(actor, Operation::CreateItem)?;
        payload.validate()?;
        self.ensure_references(&payload).await?;
        self.repos.items().create(payload).await
    }

    /// Patch the item identified by `id`; `box_id: null` makes it storeless.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no item with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<Item, DepotError> {
        authorize(actor, Operation::UpdateItem)?;
        let payload = patch.apply(self.get(id).await?);
        payload.validate()?;
        self.ensure_references(&payload).await?;
        self.repos
            .items()
            .update(payload.into_item(id))
            .await?
            .ok_or_else(|| NotFoundError::new("Item", id).into())
    }

    /// Delete an item together with its faults.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::NotFound`] when the item does not exist, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: ItemId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteItem)?;
        self.get(id).await?;
        let removed = self.repos.faults().delete_by_item(id).await?;
        if removed > 0 {
            tracing::info!(item = %id, removed, "faults removed with item");
        }
        if self.repos.items().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Item", id).into())
        }
    }

    /// Look up an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no item with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: ItemId) -> Result<Item, DepotError> {
        self.repos
            .items()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Item", id).into())
    }

    /// The item with its box, store and equipment.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when the item does not exist or one
    /// of its references dangles.
    pub async fn get_full_details(&self, id: ItemId) -> Result<ItemView, DepotError> {
        let row = self
            .repos
            .items()
            .get_joined(id)
            .await?
            .ok_or_else(|| DepotError::from(NotFoundError::new("Item", id)))?;
        ItemView::unflatten(row)
    }

    /// Joined views of the items matching `filter`, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] if any matching item has a dangling
    /// reference, or a storage error.
    pub async fn list(&self, filter: ItemFilter) -> Result<Vec<ItemView>, DepotError> {
        let rows = self.repos.items().list_joined(filter).await?;
        project_all(rows)
    }

    /// Faults reported on item `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::NotFound`] when the item does not exist, or a storage
    /// error.
    pub async fn list_faults(&self, actor: &Actor, id: ItemId) -> Result<Vec<Fault>, DepotError> {
        authorize(actor, Operation::ListItemFaults)?;
        self.get(id).await?;
        self.repos.faults().find_by_item(id).await
    }

    async fn ensure_references(&self, payload: &ItemPayload) -> Result<(), DepotError> {
        if self
            .repos
            .equipment()
            .get_by_id(payload.equipment_id)
            .await?
            .is_none()
        {
            return Err(NotFoundError::new("Equipment", payload.equipment_id).into());
        }
        if let Some(box_id) = payload.box_id
            && self.repos.boxes().get_by_id(box_id).await?.is_none()
        {
            return Err(NotFoundError::new("Box", box_id).into());
        }
        Ok(())
    }
}

impl<P> Clone for ItemService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}
