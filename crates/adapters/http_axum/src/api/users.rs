//! JSON REST handlers for user accounts.

use axum::Json;
use axum::extract::{Path, State};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::id::UserId;
use depot_domain::user::{NewUser, User};

use super::{CreateResponse, DeleteResponse, ReadResponse};
use crate::auth::CurrentActor;
use crate::error::ApiError;
use crate::extract::{Payload, parse_id};
use crate::state::AppState;

/// `GET /api/users`, admin only.
pub async fn list<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
) -> Result<ReadResponse<Vec<User>>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let users = state.users.list(&actor).await?;
    Ok(ReadResponse::Ok(Json(users)))
}

/// `GET /api/users/:id`
pub async fn get<P, H>(
    State(state): State<AppState<P, H>>,
    Path(id): Path<String>,
) -> Result<ReadResponse<User>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: UserId = parse_id("User", &id)?;
    let user = state.users.get(id).await?;
    Ok(ReadResponse::Ok(Json(user)))
}

/// `POST /api/users`
pub async fn register<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Payload(payload): Payload<NewUser>,
) -> Result<CreateResponse<User>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let created = state.users.register(&actor, payload).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `DELETE /api/users/:id`
pub async fn delete<P, H>(
    State(state): State<AppState<P, H>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let id: UserId = parse_id("User", &id)?;
    state.users.delete(&actor, id).await?;
    Ok(DeleteResponse::NoContent)
}
