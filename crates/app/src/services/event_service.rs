//! Event service — use-cases for events and their participants.

use std::sync::Arc;

use depot_domain::error::{DepotError, NotFoundError};
use depot_domain::event::{self, Event, EventPatch, EventPayload, ParticipantView};
use depot_domain::id::EventId;
use depot_domain::rights::{Actor, Operation, authorize};
use depot_domain::time::Timestamp;

use crate::ports::{EventRepository, Repositories, UserRepository};

/// Application service for events.
pub struct EventService<P> {
    repos: Arc<P>,
}

impl<P: Repositories> EventService<P> {
    /// Create a new service backed by the given repositories.
    pub fn new(repos: Arc<P>) -> Self {
        Self { repos }
    }

    /// Schedule an event.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Member,
    /// [`DepotError::InvalidInput`] for a blank name or inverted time range,
    /// [`DepotError::NotFound`] when a participant's user does not exist, or
    /// a storage error.
    #[tracing::instrument(skip(self, payload))]
    pub async fn insert(&self, actor: &Actor, payload: EventPayload) -> Result<Event, DepotError> {
        authorize(actor, Operation::CreateEvent)?;
        payload.validate()?;
        self.ensure_participants(&payload).await?;
        self.repos.events().create(payload).await
    }

    /// Patch the event identified by `id`; a given participant list replaces the stored one.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert), plus [`DepotError::NotFound`] when
    /// no event with `id` exists.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update(
        &self,
        actor: &Actor,
        id: EventId,
        patch: EventPatch,
    ) -> Result<Event, DepotError> {
        authorize(actor, Operation::UpdateEvent)?;
        let payload = patch.apply(self.get(id).await?);
        payload.validate()?;
        self.ensure_participants(&payload).await?;
        self.repos
            .events()
            .update(payload.into_event(id))
            .await?
            .ok_or_else(|| NotFoundError::new("Event", id).into())
    }

    /// Delete an event and its participant records.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::NotFound`] when the event does not exist, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: EventId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteEvent)?;
        if self.repos.events().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("Event", id).into())
        }
    }

    /// Look up an event by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no event with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: EventId) -> Result<Event, DepotError> {
        self.repos
            .events()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("Event", id).into())
    }

    /// List all events, earliest first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self) -> Result<Vec<Event>, DepotError> {
        self.repos.events().get_all().await
    }

    /// The upcoming event nearest to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no event starts at or after
    /// `now`, or a storage error.
    pub async fn next_event(&self, now: Timestamp) -> Result<Event, DepotError> {
        let events = self.repos.events().get_all().await?;
        event::next_event(&events, now)
            .cloned()
            .ok_or_else(|| NotFoundError::new("Event", "next").into())
    }

    /// Participants of event `id` with their users resolved, in
    /// registration order.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when the event or one of the
    /// participating users does not exist, or a storage error.
    pub async fn participants(&self, id: EventId) -> Result<Vec<ParticipantView>, DepotError> {
        let event = self.get(id).await?;
        let mut views = Vec::with_capacity(event.participants.len());
        for participant in event.participants {
            let user = self
                .repos
                .users()
                .get_by_id(participant.user_id)
                .await?
                .ok_or_else(|| NotFoundError::new("User", participant.user_id))?;
            views.push(ParticipantView {
                user,
                arrival: participant.arrival,
                departure: participant.departure,
            });
        }
        Ok(views)
    }

    async fn ensure_participants(&self, payload: &EventPayload) -> Result<(), DepotError> {
        for participant in &payload.participants {
            if self
                .repos
                .users()
                .get_by_id(participant.user_id)
                .await?
                .is_none()
            {
                return Err(NotFoundError::new("User", participant.user_id).into());
            }
        }
        Ok(())
    }
}

impl<P> Clone for EventService<P> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
        }
    }
}
