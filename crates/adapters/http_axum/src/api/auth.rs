//! Login endpoint.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::user::User;

use super::ReadResponse;
use crate::error::ApiError;
use crate::extract::Payload;
use crate::state::AppState;

/// Request body for logging in.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A signed bearer token and the user it was issued to.
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `POST /api/auth/login`
pub async fn login<P, H>(
    State(state): State<AppState<P, H>>,
    Payload(req): Payload<LoginRequest>,
) -> Result<ReadResponse<LoginResponse>, ApiError>
where
    P: Repositories,
    H: PasswordHasher,
{
    let user = state
        .users
        .authenticate(&req.username, &req.password)
        .await?;
    let token = state.tokens.issue(&user)?;
    tracing::debug!(username = %user.username, "token issued");
    Ok(ReadResponse::Ok(Json(LoginResponse { token, user })))
}
