//! Equipment service — use-cases for the equipment catalog.

use std::sync::Arc;

use depot_domain::equipment::{Equipment, EquipmentPatch, EquipmentPayload};
use depot_domain::error::{DepotError, NotFoundError, ValidationError};
use depot_domain::id::EquipmentId;
use depot_domain::rights::{Actor, Operation, authorize};

use crate::ports::{EquipmentRepository, ItemRepository, Repositories};

/// Application service for catalog entries.
pub struct EquipmentService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> EquipmentService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Create a catalog entry.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] for a blank name, or a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(
        &self,
        actor: &Actor,
        payload: EquipmentPayload,
    ) -> Result<Equipment, DepotError> {
        authorize(actor, Operation::CreateEquipment)?;
        payload.validate()?;
        self.repos.equipment().create(payload).await
    }

    /// Rename the catalog entry identified by `id`.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no entry with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: EquipmentId,
        patch: EquipmentPatch,
    ) -> Result<Equipment, DepotError> {
        authorize(actor, Operation::UpdateEquipment)?;
        let payload = patch.apply(self.get(id).await?);
        payload.validate()?;
        self.repos
            .equipment()
            .update(payload.into_equipment(id))
            .await?
            .ok_or_else(|| NotFoundError::new("Equipment", id).into())
    }

    /// Delete a catalog entry no item refers to.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] with [`ValidationError::EquipmentInUse`]
    /// while items still instantiate it, [`DepotError::NotFound`] when it
    /// does not exist, or a storage error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: EquipmentId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteEquipment)?;
        self.get(id).await?;
        let items = self.repos.items().count_by_equipment(id).await?;
        if items > 0 {
            return Err(ValidationError::EquipmentInUse {
                id: id.to_string(),
                items,
            }
            .into());
        }
        if self.repos.equipment().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Equipment", id).into())
        }
    }

    /// Look up a catalog entry by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no entry with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: EquipmentId) -> Result<Equipment, DepotError> {
        self.repos
            .equipment()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Equipment", id).into())
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<Equipment>, DepotError> {
        self.repos.equipment().get_all().await
    }
}

impl<P> Clone for EquipmentService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}
