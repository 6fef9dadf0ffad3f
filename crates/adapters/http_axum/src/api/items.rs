//! JSON REST handlers for items and the faults reported on them.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::fault::{Fault, FaultReport};
use depot_domain::id::ItemId;
use depot_domain::item::{Item, ItemFilter, ItemPatch, ItemPayload};
use depot_domain::projection::ItemView;

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Filter, Payload, parse_id};
use crate::state::AppState;

/// `GET /api/items?storeless=true&box_id=3`
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
    Filter(filter): Filter<ItemFilter>,
) -> Result<ReadResponse<Vec<ItemView>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let items = state.items.list(filter).await?;
    Ok(ReadResponse::Ok(Json(items)))
}

/// `GET /api/items/storeless`
pub async fn storeless<P, H>(
    State(state): State<AppState<P, H>>,
) -> Result<ReadResponse<Vec<ItemView>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let items = state.items.list(ItemFilter::storeless()).await?;
    Ok(ReadResponse::Ok(Json(items)))
}

/// `GET /api/items/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<ItemView>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: ItemId = parse_id("Item", &id)?;
    let view = state.items.get_full_details(id).await?;
    Ok(ReadResponse::Ok(Json(view)))
}

/// `POST /api/items`
pub async fn create<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<ItemPayload>,
) -> Result<CreateResponse<Item>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.items.insert(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/items/:id`: fields left out keep their value;
/// `"box_id": null` makes the item storeless.
pub async fn update<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(patch): Payload<ItemPatch>,
) -> Result<ReadResponse<Item>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: ItemId = parse_id("Item", &id)?;
    let updated = state.items.update(&actor, id, patch).await?;
    Ok(ReadResponse::Ok(Json(updated)))
}

/// `DELETE /api/items/:id`: the item's faults go with it.
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: ItemId = parse_id("Item", &id)?;
    state.items.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `GET /api/items/:id/faults`
pub async fn faults<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<ReadResponse<Vec<Fault>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: ItemId = parse_id("Item", &id)?;
    let faults = state.items.list_faults(&actor, id).await?;
    Ok(ReadResponse::Ok(Json(faults)))
}

/// `POST /api/items/:id/faults`
pub async fn post_fault<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    Payload(report): Payload<FaultReport>,
) -> Result<CreateResponse<Fault>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: ItemId = parse_id("Item", &id)?;
    let created = state.faults.post_fault(&actor, id, report).await?;
    Ok(CreateResponse::Created(Json(created)))
}
