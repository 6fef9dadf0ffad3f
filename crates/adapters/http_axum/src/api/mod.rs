//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod auth;
#[allow(clippy::missing_errors_doc)]
pub mod boxes;
#[allow(clippy::missing_errors_doc)]
pub mod equipment;
#[allow(clippy::missing_errors_doc)]
pub mod events;
#[allow(clippy::missing_errors_doc)]
pub mod faults;
#[allow(clippy::missing_errors_doc)]
pub mod items;
#[allow(clippy::missing_errors_doc)]
pub mod stores;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Serialize;

use depot_app::ports::{PasswordHasher, Repositories};

use crate::state::AppState;

/// Possible responses from read and update endpoints.
pub enum ReadResponse<T> {
    Ok(Json<T>),
}

impl<T: Serialize> IntoResponse for ReadResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from create endpoints.
pub enum CreateResponse<T> {
    Created(Json<T>),
}

impl<T: Serialize> IntoResponse for CreateResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from delete endpoints.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Build the `/api` sub-router.
pub fn routes<P, H>() -> Router<AppState<P, H>>
where
    P: Repositories,
    H: PasswordHasher,
{
    Router::new()
        // Authentication
        .route("/auth/login", post(auth::login::<P, H>))
        // Users
        .route(
            "/users",
            get(users::list::<P, H>).post(users::register::<P, H>),
        )
        .route(
            "/users/{id}",
            get(users::get::<P, H>).delete(users::delete::<P, H>),
        )
        // Stores
        .route(
            "/stores",
            get(stores::list::<P, H>).post(stores::create::<P, H>),
        )
        .route(
            "/stores/{id}",
            get(stores::get::<P, H>)
                .patch(stores::update::<P, H>)
                .delete(stores::delete::<P, H>),
        )
        // Boxes
        .route(
            "/boxes",
            get(boxes::list::<P, H>).post(boxes::create::<P, H>),
        )
        .route(
            "/boxes/{id}",
            get(boxes::get::<P, H>)
                .patch(boxes::update::<P, H>)
                .delete(boxes::delete::<P, H>),
        )
        .route("/boxes/{id}/items", get(boxes::items::<P, H>))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list::<P, H>).post(equipment::create::<P, H>),
        )
        .route(
            "/equipment/{id}",
            get(equipment::get::<P, H>)
                .patch(equipment::update::<P, H>)
                .delete(equipment::delete::<P, H>),
        )
        // Items
        .route(
            "/items",
            get(items::list::<P, H>).post(items::create::<P, H>),
        )
        .route("/items/storeless", get(items::storeless::<P, H>))
        .route(
            "/items/{id}",
            get(items::get::<P, H>)
                .patch(items::update::<P, H>)
                .delete(items::delete::<P, H>),
        )
        .route(
            "/items/{id}/faults",
            get(items::faults::<P, H>).post(items::post_fault::<P, H>),
        )
        // Faults
        .route(
            "/faults",
            get(faults::list::<P, H>).post(faults::create::<P, H>),
        )
        .route("/faults/summary", get(faults::summary::<P, H>))
        .route(
            "/faults/{id}",
            get(faults::get::<P, H>)
                .patch(faults::update::<P, H>)
                .delete(faults::delete::<P, H>),
        )
        // Events
        .route(
            "/events",
            get(events::list::<P, H>).post(events::create::<P, H>),
        )
        .route("/events/next", get(events::next::<P, H>))
        .route(
            "/events/{id}",
            get(events::get::<P, H>)
                .patch(events::update::<P, H>)
                .delete(events::delete::<P, H>),
        )
        .route(
            "/events/{id}/participants",
            get(events::participants::<P, H>),
        )
}
