//! User — an account with a permission tier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::UserId;

/// Ordinal permission tier attached to a [`User`].
///
/// Variants are declared lowest first, so the derived ordering is the
/// permission ordering: `Guest < Member < Admin`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UserRight {
    #[default]
    Guest,
    Member,
    Admin,
}

impl UserRight {
    /// Numeric level used for storage.
    #[must_use]
    pub const fn level(self) -> i64 {
        match self {
            Self::Guest => 0,
            Self::Member => 1,
            Self::Admin => 2,
        }
    }

    /// Inverse of [`level`](Self::level); `None` for unknown levels.
    #[must_use]
    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Guest),
            1 => Some(Self::Member),
            2 => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => f.write_str("guest"),
            Self::Member => f.write_str("member"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

/// A user as exposed to every outbound path.
///
/// The password never lives on this type; it only exists inbound on
/// [`NewUser`] and as a hash inside the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub right: UserRight,
}

/// Registration payload. Deserialize-only: the password is write-only.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub right: UserRight,
}

impl NewUser {
    /// Check that the identifying fields and the password are present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for a blank username or password.
    pub fn validate(&self) -> Result<(), ValidationError> {
        crate::require_non_empty("username", &self.username)?;
        if self.password.is_empty() {
            return Err(ValidationError::EmptyField("password"));
        }
        Ok(())
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("right", &self.right)
            .finish()
    }
}
