//! Box service — use-cases for storage boxes and their joined views.

use std::sync::Arc;

use depot_domain::error::{DepotError, NotFoundError};
use depot_domain::id::BoxId;
use depot_domain::item::ItemFilter;
use depot_domain::projection::{BoxView, ItemView, JoinShape, project_all};
use depot_domain::rights::{Actor, Operation, authorize};
use depot_domain::storage_box::{BoxPatch, BoxPayload, StorageBox};

use crate::ports::{BoxRepository, ItemRepository, Repositories, StoreRepository};

/// Application service for boxes.
pub struct BoxService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> BoxService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Create a box, optionally placed in an existing store.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] for a blank code,
    /// [`DepotError::NotFound`] when the store does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(
        &self,
        actor: &Actor,
        payload: BoxPayload,
    ) -> Result<StorageBox, DepotError> {
        authorize(actor, Operation::CreateBox)?;
        payload.validate()?;
        self.ensure_store(&payload).await?;
        self.repos.boxes().create(payload).await
    }

    /// Patch the box identified by `id`; any id in the body is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no box with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: BoxId,
        patch: BoxPatch,
    ) -> Result<StorageBox, DepotError> {
        authorize(actor, Operation::UpdateBox)?;
        let payload = patch.apply(self.get(id).await?);
        payload.validate()?;
        self.ensure_store(&payload).await?;
        self.repos
            .boxes()
            .update(payload.into_box(id))
            .await?
            .ok_or_else(|| NotFoundError::new("Box", id).into())
    }

    /// Delete a box; its items become storeless.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::NotFound`] when the box does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: BoxId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteBox)?;
        self.get(id).await?;
        let detached = self.repos.items().detach_from_box(id).await?;
        if detached > 0 {
            tracing::info!(storage_box = %id, detached, "items moved out of deleted box");
        }
        if self.repos.boxes().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Box", id).into())
        }
    }

    /// Look up a box by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no box with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: BoxId) -> Result<StorageBox, DepotError> {
        self.repos
            .boxes()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Box", id).into())
    }

    /// The box with its store and the store's manager.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when the box does not exist or when
    /// its store or manager reference dangles.
    pub async fn get_full_details(&self, id: BoxId) -> Result<BoxView, DepotError> {
        let row = self
            .repos
            .boxes()
            .get_joined(id)
            .await?
            .ok_or_else(|| DepotError::from(NotFoundError::new("Box", id)))?;
        BoxView::unflatten(row)
    }

    /// Every box as a joined view, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] if any box has a dangling
    /// reference, or a storage error from the repository.
    pub async fn list(&self) -> Result<Vec<BoxView>, DepotError> {
        let rows = self.repos.boxes().list_joined().await?;
        project_all(rows)
    }

    /// The joined views of every item inside box `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::NotFound`] when the box does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_items(&self, actor: &Actor, id: BoxId) -> Result<Vec<ItemView>, DepotError> {
        authorize(actor, Operation::ListBoxItems)?;
        self.get(id).await?;
        let rows = self.repos.items().list_joined(ItemFilter::in_box(id)).await?;
        project_all(rows)
    }

    async fn ensure_store(&self, payload: &BoxPayload) -> Result<(), DepotError> {
        let Some(store_id) = payload.store_id else {
            return Ok(());
        };
        match self.repos.stores().get_by_id(store_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new("Store", store_id).into()),
        }
    }
}

impl<P> Clone for BoxService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}
