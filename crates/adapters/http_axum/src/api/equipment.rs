//! JSON REST handlers for the equipment catalog.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::equipment::{Equipment, EquipmentPatch, EquipmentPayload};
use depot_domain::id::EquipmentId;

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/equipment`
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<Equipment>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let equipment = state.equipment.list().await?;
    Ok(ReadResponse::Ok(Json(equipment)))
}

/// `GET /api/equipment/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<Equipment>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EquipmentId = parse_id("Equipment", &id)?;
    let equipment = state.equipment.get(id).await?;
    Ok(ReadResponse::Ok(Json(equipment)))
}

/// `POST /api/equipment`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<EquipmentPayload>,
) -> Result<CreateResponse<Equipment>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.equipment.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/equipment/:id`
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<EquipmentPatch>,
) -> Result<ReadResponse<Equipment>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EquipmentId = parse_id("Equipment", &id)?;
    let updated = state.equipment.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/equipment/:id`: refused while items still use it.
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: EquipmentId = parse_id("Equipment", &id)?;
    state.equipment.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
