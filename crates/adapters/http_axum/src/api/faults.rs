//! JSON REST handlers for faults.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::fault::{Fault, FaultPatch, FaultPayload, FaultSummary};
use depot_domain::id::FaultId;

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/faults`
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<Fault>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let faults = state.faults.list().await?;
    Ok(ReadResponse::Ok(Json(faults)))
}

/// `GET /api/faults/summary`: each fault with its item code and equipment name.
pub async fn summary<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<FaultSummary>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let summaries = state.faults.list_summaries().await?;
    Ok(ReadResponse::Ok(Json(summaries)))
}

/// `GET /api/faults/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<Fault>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: FaultId = parse_id("Fault", &id)?;
    let fault = state.faults.get(id).await?;
    Ok(ReadResponse::Ok(Json(fault)))
}

/// `POST /api/faults`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<FaultPayload>,
) -> Result<CreateResponse<Fault>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.faults.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/faults/:id`
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<FaultPatch>,
) -> Result<ReadResponse<Fault>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: FaultId = parse_id("Fault", &id)?;
    let updated = state.faults.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/faults/:id`
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: FaultId = parse_id("Fault", &id)?;
    state.faults.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
