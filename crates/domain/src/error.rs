//! Error taxonomy shared across the workspace.
//!
//! Every layer reports failures as a [`DepotError`]. Adapters convert their
//! own typed errors into it via `From`, and the transport layer maps each
//! variant to a status class.

use crate::user::UserRight;

/// Top-level error returned by every domain and application operation.
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    /// The actor may not perform the operation.
    #[error(transparent)]
    Unauthorized(#[from] UnauthorizedError),

    /// The request payload or an identifier failed validation.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// An identity did not resolve to a stored row.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The underlying store failed for reasons opaque to the core.
    #[error("persistence failure")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Why an actor was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnauthorizedError {
    /// No authenticated user was attached to the request.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The user is authenticated but ranks below the operation's minimum.
    #[error("insufficient right: {required} required, {actual} granted")]
    InsufficientRight {
        required: UserRight,
        actual: UserRight,
    },

    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The bearer token could not be verified.
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("fault status {0} is out of range")]
    FaultStatusOutOfRange(i64),

    #[error("{0} must not precede its start")]
    InvalidTimeRange(&'static str),

    #[error("invalid {entity} identifier: {value}")]
    InvalidIdentifier { entity: &'static str, value: String },

    #[error("equipment {id} is still used by {items} item(s)")]
    EquipmentInUse { id: String, items: u64 },

    #[error("username {0} is already taken")]
    DuplicateUsername(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// An identity that did not resolve to a stored row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

impl NotFoundError {
    /// Build a not-found error for `entity` with the given identifier.
    #[must_use]
    pub fn new(entity: &'static str, id: impl ToString) -> Self {
        Self {
            entity,
            id: id.to_string(),
        }
    }
}
