//! Store service — use-cases for managing stores.

use std::sync::Arc;

use depot_domain::error::{DepotError, NotFoundError};
use depot_domain::id::StoreId;
use depot_domain::rights::{Actor, Operation, authorize};
use depot_domain::store::{Store, StorePatch, StorePayload};

use crate::ports::{BoxRepository, Repositories, StoreRepository, UserRepository};

/// Application service for store CRUD operations.
pub struct StoreService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> StoreService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Create a store after checking rights, invariants and the manager.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::InvalidInput`] for a blank name or address,
    /// [`DepotError::NotFound`] when the manager does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(&self, actor: &Actor, payload: StorePayload) -> Result<Store, DepotError> {
        authorize(actor, Operation::CreateStore)?;
        payload.validate()?;
        self.ensure_manager(&payload).await?;
        self.repos.stores().create(payload).await
    }

    /// Patch the store identified by `id`.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no store with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: StoreId,
        patch: StorePatch,
    ) -> Result<Store, DepotError> {
        authorize(actor, Operation::UpdateStore)?;
        let payload = patch.apply(self.get(id).await?);
        payload.validate()?;
        self.ensure_manager(&payload).await?;
        self.repos
            .stores()
            .update(payload.into_store(id))
            .await?
            .ok_or_else(|| NotFoundError::new("Store", id).into())
    }

    /// Delete a store; its boxes become storeless.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::NotFound`] when the store does not exist, or a storage
    /// error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: StoreId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteStore)?;
        self.get(id).await?;
        let detached = self.repos.boxes().detach_from_store(id).await?;
        if detached > 0 {
            tracing::info!(store = %id, detached, "boxes moved out of deleted store");
        }
        if self.repos.stores().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Store", id).into())
        }
    }

    /// Look up a store by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no store with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: StoreId) -> Result<Store, DepotError> {
        self.repos
            .stores()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Store", id).into())
    }

    /// List all stores.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<Store>, DepotError> {
        self.repos.stores().get_all().await
    }

    async fn ensure_manager(&self, payload: &StorePayload) -> Result<(), DepotError> {
        match self.repos.users().get_by_id(payload.manager_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new("User", payload.manager_id).into()),
        }
    }
}

impl<P> Clone for StoreService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}
