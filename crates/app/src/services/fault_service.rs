//! Fault service — use-cases for fault reports.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use depot_domain::equipment::Equipment;
use depot_domain::error::{DepotError, NotFoundError};
use depot_domain::fault::{
    Fault, FaultPatch, FaultPayload, FaultReport, FaultSummary, NewFault,
};
use depot_domain::id::{EquipmentId, FaultId, ItemId};
use depot_domain::item::Item;
use depot_domain::rights::{Actor, Operation, authorize};
use depot_domain::time::now;

use crate::ports::{EquipmentRepository, FaultRepository, ItemRepository, Repositories};

/// Application service for faults.
pub struct FaultService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> FaultService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Record a fault described by a full payload.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] for an out-of-range status,
    /// [`DepotError::NotFound`] when the item does not exist, or a storage
    /// error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(&self, actor: &Actor, payload: FaultPayload) -> Result<Fault, DepotError> {
        authorize(actor, Operation::CreateFault)?;
        let fault = payload.validate()?;
        self.record(fault).await
    }

    /// Record a fault against item `item_id`, taken from the path.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert). The status is checked before the
    /// item, so an out-of-range status always yields `InvalidInput`.
    #[tracing::instrument(skip(self, report))]
    pub async fn post_fault(
        &self,
        actor: &Actor,
        item_id: ItemId,
        report: FaultReport,
    ) -> Result<Fault, DepotError> {
        authorize(actor, Operation::CreateFault)?;
        let fault = report.for_item(item_id).validate()?;
        self.record(fault).await
    }

    /// Patch the fault identified by `id`, keeping its creation time.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no fault with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: FaultId,
        patch: FaultPatch,
    ) -> Result<Fault, DepotError> {
        authorize(actor, Operation::UpdateFault)?;
        let existing = self.get(id).await?;
        let fault = patch.apply(&existing).validate()?;
        self.ensure_item(fault.item_id).await?;
        let updated = Fault {
            id,
            item_id: fault.item_id,
            status: fault.status,
            description: fault.description,
            created_at: existing.created_at,
            updated_at: now(),
        };
        self.repos
            .faults()
            .update(updated)
            .await?
            .ok_or_else(|| NotFoundError::new("Fault", id).into())
    }

    /// Delete a fault.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::NotFound`] when the fault does not exist, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: FaultId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteFault)?;
        if self.repos.faults().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Fault", id).into())
        }
    }

    /// Look up a fault by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no fault with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: FaultId) -> Result<Fault, DepotError> {
        self.repos
            .faults()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Fault", id).into())
    }

    /// List all faults.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<Fault>, DepotError> {
        self.repos.faults().get_all().await
    }

    /// Every fault with the code of its item and its equipment's name.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when a fault's item or that item's
    /// equipment no longer exists, or a storage error.
    pub async fn list_summaries(&self) -> Result<Vec<FaultSummary>, DepotError> {
        let faults = self.repos.faults().get_all().await?;
        let mut items: HashMap<ItemId, Item> = HashMap::new();
        let mut equipment: HashMap<EquipmentId, Equipment> = HashMap::new();
        let mut summaries = Vec::with_capacity(faults.len());

        for fault in faults {
            let item = match items.entry(fault.item_id) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    let item = self
                        .repos
                        .items()
                        .get_by_id(fault.item_id)
                        .await?
                        .ok_or_else(|| NotFoundError::new("Item", fault.item_id))?;
                    slot.insert(item)
                }
            };
            let entry = match equipment.entry(item.equipment_id) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    let entry = self
                        .repos
                        .equipment()
                        .get_by_id(item.equipment_id)
                        .await?
                        .ok_or_else(|| NotFoundError::new("Equipment", item.equipment_id))?;
                    slot.insert(entry)
                }
            };

            summaries.push(FaultSummary {
                item_code: item.code.clone(),
                equipment_name: entry.name.clone(),
                fault,
            });
        }
        Ok(summaries)
    }

    async fn record(&self, fault: NewFault) -> Result<Fault, DepotError> {
        self.ensure_item(fault.item_id).await?;
        self.repos.faults().create(fault, now()).await
    }

    async fn ensure_item(&self, item_id: ItemId) -> Result<(), DepotError> {
        match self.repos.items().get_by_id(item_id).await? {
            Some(_) => Ok(()),
            None => Err(NotFoundError::new("Item", item_id).into()),
        }
    }
}

impl<P> Clone for FaultService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryRepositories, admin, member, repos};
    use depot_domain::equipment::EquipmentPayload;
    use depot_domain::error::{UnauthorizedError, ValidationError};
    use depot_domain::fault::FaultStatus;
    use depot_domain::item::ItemPayload;

    async fn setup() -> (Arc<InMemoryRepositories>, FaultService<InMemoryRepositories>, ItemId) {
        let repos = repos();
        let equipment = repos
            .equipment()
            .create(EquipmentPayload {
                name: "Stove".to_string(),
            })
            .await
            .unwrap();
        let item = repos
            .items()
            .create(ItemPayload {
                code: "S-07".to_string(),
                description: String::new(),
                equipment_id: equipment.id,
                box_id: None,
            })
            .await
            .unwrap();
        (Arc::clone(&repos), FaultService::new(repos), item.id)
    }

    fn report(status: i64) -> FaultReport {
        FaultReport {
            status,
            description: "leaking valve".to_string(),
        }
    }

    #[tokio::test]
    async fn should_reject_out_of_range_status_and_persist_nothing() {
        let (_repos, svc, _item) = setup().await;

        let result = svc.post_fault(&member(), ItemId::new(7), report(999)).await;

        assert!(matches!(
            result,
            Err(DepotError::InvalidInput(
                ValidationError::FaultStatusOutOfRange(999)
            ))
        ));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_post_fault_on_path_item() {
        let (_repos, svc, item) = setup().await;

        let fault = svc.post_fault(&member(), item, report(1)).await.unwrap();

        assert_eq!(fault.item_id, item);
        assert_eq!(fault.status, FaultStatus::InProgress);
        assert_eq!(fault.created_at, fault.updated_at);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_item() {
        let (_repos, svc, _item) = setup().await;
        let result = svc.post_fault(&member(), ItemId::new(404), report(0)).await;
        assert!(matches!(
            result,
            Err(DepotError::NotFound(NotFoundError { entity: "Item", .. }))
        ));
    }

    #[tokio::test]
    async fn should_allow_reopening_a_fixed_fault() {
        let (_repos, svc, item) = setup().await;
        let fault = svc.post_fault(&member(), item, report(2)).await.unwrap();

        let reopened = svc
            .update(
                &member(),
                fault.id,
                FaultPatch {
                    status: Some(0),
                    description: Some("leaking again".to_string()),
                    ..FaultPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(reopened.status, FaultStatus::New);
        assert_eq!(reopened.created_at, fault.created_at);
    }

    #[tokio::test]
    async fn should_require_admin_to_delete() {
        let (_repos, svc, item) = setup().await;
        let fault = svc.post_fault(&member(), item, report(0)).await.unwrap();

        let result = svc.delete(&member(), fault.id).await;
        assert!(matches!(
            result,
            Err(DepotError::Unauthorized(
                UnauthorizedError::InsufficientRight { .. }
            ))
        ));

        svc.delete(&admin(), fault.id).await.unwrap();
        assert!(matches!(svc.get(fault.id).await, Err(DepotError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_summarize_faults_with_item_code_and_equipment_name() {
        let (_repos, svc, item) = setup().await;
        svc.post_fault(&member(), item, report(0)).await.unwrap();
        svc.post_fault(&member(), item, report(3)).await.unwrap();

        let summaries = svc.list_summaries().await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.item_code == "S-07"));
        assert!(summaries.iter().all(|s| s.equipment_name == "Stove"));
        assert_eq!(summaries[1].fault.status, FaultStatus::Unfixable);
    }
}
