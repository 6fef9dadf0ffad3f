//! The [`CurrentActor`] extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use depot_app::ports::{PasswordHasher, Repositories};
use depot_domain::error::{DepotError, UnauthorizedError};
use depot_domain::rights::Actor;

use crate::error::ApiError;
use crate::state::AppState;

/// The acting user of a request.
///
/// A request without an `Authorization` header is [`Actor::Anonymous`];
/// the services decide whether that is enough. A header that is present
/// but not a valid bearer token is rejected with 401, as is a token whose
/// user has since been deleted. The right comes from the stored account,
/// not from the token, so demotions apply immediately.
pub struct CurrentActor(pub Actor);

impl<P, H> FromRequestParts<AppState<P, H>> for CurrentActor
where
    P: Repositories,
    H: PasswordHasher,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<P, H>,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(Actor::Anonymous));
        };
        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                DepotError::from(UnauthorizedError::InvalidToken(
                    "expected a bearer token".to_string(),
                ))
            })?;

        let claims = state.tokens.verify(token.trim())?;
        let actor = state.users.resolve_actor(claims.user_id()).await?;
        Ok(Self(actor))
    }
}
