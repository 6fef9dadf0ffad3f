//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use depot_domain::error::{DepotError, UnauthorizedError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`DepotError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(DepotError);

impl From<DepotError> for ApiError {
    fn from(err: DepotError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            DepotError::Unauthorized(UnauthorizedError::InsufficientRight { .. }) => {
                StatusCode::FORBIDDEN
            }
            DepotError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DepotError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            DepotError::NotFound(_) => StatusCode::NOT_FOUND,
            DepotError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            DepotError::Persistence(err) => {
                tracing::error!(error = %err, "persistence error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
