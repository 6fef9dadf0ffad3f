//! Password port — one-way hashing of user secrets.

use depot_domain::error::DepotError;

/// Hashes and verifies passwords. Plain passwords never reach storage.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash `password` for storage.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Persistence`] when hashing fails.
    fn hash(&self, password: &str) -> Result<String, DepotError>;

    /// Check `password` against a stored `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Persistence`] when the stored hash is unreadable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DepotError>;
}
