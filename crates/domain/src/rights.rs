//! Rights model — who may perform which mutation.
//!
//! Every mutating service call starts with [`authorize`], which looks up the
//! operation's minimum [`UserRight`] in [`Operation::minimum_right`] and
//! compares it with the acting user's right. The check has no side effects.

use crate::error::{DepotError, UnauthorizedError};
use crate::id::UserId;
use crate::user::UserRight;

/// The party performing an operation, as resolved by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// No credentials were presented.
    Anonymous,
    /// An authenticated user.
    User { id: UserId, right: UserRight },
}

impl Actor {
    /// The actor's right, or `None` when anonymous.
    #[must_use]
    pub const fn right(&self) -> Option<UserRight> {
        match self {
            Self::Anonymous => None,
            Self::User { right, .. } => Some(*right),
        }
    }
}

/// Operations gated by a minimum right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateStore,
    UpdateStore,
    DeleteStore,
    CreateBox,
    UpdateBox,
    DeleteBox,
    ListBoxItems,
    CreateEquipment,
    UpdateEquipment,
    DeleteEquipment,
    CreateItem,
    UpdateItem,
    DeleteItem,
    ListItemFaults,
    CreateFault,
    UpdateFault,
    DeleteFault,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    CreateUser,
    DeleteUser,
    ListUsers,
}

impl Operation {
    /// Lowest right allowed to perform this operation.
    #[must_use]
    pub const fn minimum_right(self) -> UserRight {
        match self {
            Self::CreateBox
            | Self::UpdateBox
            | Self::DeleteBox
            | Self::ListBoxItems
            | Self::CreateEquipment
            | Self::UpdateEquipment
            | Self::DeleteEquipment
            | Self::CreateItem
            | Self::UpdateItem
            | Self::DeleteItem
            | Self::ListItemFaults
            | Self::CreateFault
            | Self::UpdateFault
            | Self::CreateEvent
            | Self::UpdateEvent => UserRight::Member,
            Self::CreateStore
            | Self::UpdateStore
            | Self::DeleteStore
            | Self::DeleteFault
            | Self::DeleteEvent
            | Self::CreateUser
            | Self::DeleteUser
            | Self::ListUsers => UserRight::Admin,
        }
    }
}

/// Succeed iff `actor` is a user whose right is at least `minimum`.
///
/// # Errors
///
/// Returns [`DepotError::Unauthorized`] with
/// [`UnauthorizedError::AuthenticationRequired`] for anonymous actors and
/// [`UnauthorizedError::InsufficientRight`] when the right is too low.
pub fn require_right(actor: &Actor, minimum: UserRight) -> Result<(), DepotError> {
    match actor.right() {
        None => Err(UnauthorizedError::AuthenticationRequired.into()),
        Some(actual) if actual < minimum => Err(UnauthorizedError::InsufficientRight {
            required: minimum,
            actual,
        }
        .into()),
        Some(_) => Ok(()),
    }
}

/// [`require_right`] with the minimum taken from `operation`.
///
/// # Errors
///
/// See [`require_right`].
pub fn authorize(actor: &Actor, operation: Operation) -> Result<(), DepotError> {
    require_right(actor, operation.minimum_right())
}
