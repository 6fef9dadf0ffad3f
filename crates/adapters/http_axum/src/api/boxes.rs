//! JSON REST handlers for boxes.
//!
//! Reads answer with the joined [`BoxView`] (box, store and the store's
//! manager) rather than the bare row.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::id::BoxId;
use depot_domain::projection::{BoxView, ItemView};
use depot_domain::storage_box::{BoxPatch, BoxPayload, StorageBox};

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/boxes`
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<BoxView>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let boxes = state.boxes.list().await?;
    Ok(ReadResponse::Ok(Json(boxes)))
}

/// `GET /api/boxes/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<BoxView>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: BoxId = parse_id("Box", &id)?;
    let view = state.boxes.get_full_details(id).await?;
    Ok(ReadResponse::Ok(Json(view)))
}

/// `GET /api/boxes/:id/items`
pub async fn items<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<ReadResponse<Vec<ItemView>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: BoxId = parse_id("Box", &id)?;
    let items = state.boxes.list_items(&actor, id).await?;
    Ok(ReadResponse::Ok(Json(items)))
}

/// `POST /api/boxes`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<BoxPayload>,
) -> Result<CreateResponse<StorageBox>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.boxes.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/boxes/:id`: fields left out keep their value;
/// `"store_id": null` makes the box storeless.
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<BoxPatch>,
) -> Result<ReadResponse<StorageBox>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: BoxId = parse_id("Box", &id)?;
    let updated = state.boxes.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/boxes/:id`
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: BoxId = parse_id("Box", &id)?;
    state.boxes.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
