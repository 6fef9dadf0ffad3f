//! JSON REST handlers for events and their participants.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::event::{Event, EventPatch, EventPayload, ParticipantView};
use depot_domain::id::EventId;
use depot_domain::time::now;

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/events`, ordered by start.
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<Event>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let events = state.events.list().await?;
    Ok(ReadResponse::Ok(Json(events)))
}

/// `GET /api/events/next`: the nearest event starting now or later.
pub async fn next<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Event>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let event = state.events.next_event(now()).await?;
    Ok(ReadResponse::Ok(Json(event)))
}

/// `GET /api/events/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<Event>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EventId = parse_id("Event", &id)?;
    let event = state.events.get(id).await?;
    Ok(ReadResponse::Ok(Json(event)))
}

/// `GET /api/events/:id/participants`
pub async fn participants<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<Vec<ParticipantView>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EventId = parse_id("Event", &id)?;
    let participants = state.events.participants(id).await?;
    Ok(ReadResponse::Ok(Json(participants)))
}

/// `POST /api/events`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<EventPayload>,
) -> Result<CreateResponse<Event>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.events.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/events/:id`: a given `participants` list replaces the
/// stored one.
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<EventPatch>,
) -> Result<ReadResponse<Event>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EventId = parse_id("Event", &id)?;
    let updated = state.events.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/events/:id`
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EventId = parse_id("Event", &id)?;
    state.events.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
