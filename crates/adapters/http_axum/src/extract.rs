//! Request extractors whose rejections speak [`ApiError`].
//!
//! Axum's own rejections answer in plain text with their own status codes;
//! these wrappers turn a malformed body, query or path id into
//! [`DepotError::InvalidInput`] so every failure shares one JSON shape.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use depot_domain::error::{DepotError, ValidationError};

use crate::error::ApiError;

/// JSON request body.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed(&rejection)),
        }
    }
}

/// URL query string.
pub struct Filter<T>(pub T);

impl<S, T> FromRequestParts<S> for Filter<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed_query(&rejection)),
        }
    }
}

fn malformed(rejection: &JsonRejection) -> ApiError {
    DepotError::from(ValidationError::MalformedPayload(rejection.body_text())).into()
}

fn malformed_query(rejection: &QueryRejection) -> ApiError {
    DepotError::from(ValidationError::MalformedPayload(rejection.body_text())).into()
}

/// Parse a path segment into a typed identifier.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIdentifier`] when `raw` is not an
/// integer.
pub fn parse_id<I: FromStr>(entity: &'static str, raw: &str) -> Result<I, ApiError> {
    I::from_str(raw).map_err(|_| {
        DepotError::from(ValidationError::InvalidIdentifier {
            entity,
            value: raw.to_string(),
        })
        .into()
    })
}
