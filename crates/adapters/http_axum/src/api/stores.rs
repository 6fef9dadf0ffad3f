//! JSON REST handlers for stores.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::id::StoreId;
use depot_domain::store::{Store, StorePatch, StorePayload};

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/stores`
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<Store>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let stores = state.stores.list().await?;
    Ok(ReadResponse::Ok(Json(stores)))
}

/// `GET /api/stores/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<Store>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: StoreId = parse_id("Store", &id)?;
    let store = state.stores.get(id).await?;
    Ok(ReadResponse::Ok(Json(store)))
}

/// `POST /api/stores`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<StorePayload>,
) -> Result<CreateResponse<Store>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.stores.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/stores/:id`: fields left out keep their value.
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<StorePatch>,
) -> Result<ReadResponse<Store>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: StoreId = parse_id("Store", &id)?;
    let updated = state.stores.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/stores/:id`: boxes of the store become storeless.
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: StoreId = parse_id("Store", &id)?;
    state.stores.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
