//! bcrypt implementation of the [`PasswordHasher`] port.

use depot_app::ports::PasswordHasher;
use depot_domain::error::DepotError;

/// Hashes passwords with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Use a custom work factor (4..=31).
    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DepotError> {
        bcrypt::hash(password, self.cost).map_err(|err| DepotError::Persistence(Box::new(err)))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DepotError> {
        bcrypt::verify(password, hash).map_err(|err| DepotError::Persistence(Box::new(err)))
    }
}
