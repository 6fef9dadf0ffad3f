//! User service — accounts, credentials and the bootstrap administrator.

use std::sync::Arc;

use depot_domain::error::{DepotError, NotFoundError, UnauthorizedError, ValidationError};
use depot_domain::id::UserId;
use depot_domain::rights::{Actor, Operation, authorize};
use depot_domain::user::{NewUser, User, UserRight};

use crate::ports::{PasswordHasher, Repositories, UserRepository};

/// Application service for user accounts.
pub struct UserService<P, H> {
    repos: Arc<P>,
    hasher: Arc<H>,
}

impl<P: Repositories, H: PasswordHasher> UserService<P, H> {
    /// Create a new service backed by the given repositories and hasher.
    pub fn new(repos: Arc<P>, hasher: Arc<H>) -> Self {
        Self { repos, hasher }
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::InvalidInput`] for a blank username or password or a
    /// taken username, or a storage error.
    #[tracing::instrument(skip(self, payload), fields(username = %payload.username))]
    pub async fn register(&self, actor: &Actor, payload: NewUser) -> Result<User, DepotError> {
        authorize(actor, Operation::CreateUser)?;
        self.create(payload).await
    }

    /// Create `payload` as an administrator unless its username is taken.
    ///
    /// Returns the created user, or `None` when the account already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::InvalidInput`] for a blank username or
    /// password, or a storage error.
    pub async fn bootstrap_admin(&self, mut payload: NewUser) -> Result<Option<User>, DepotError> {
        payload.validate()?;
        if self
            .repos
            .users()
            .find_credentials(&payload.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %payload.username, "bootstrap admin already present");
            return Ok(None);
        }
        payload.right = UserRight::Admin;
        let user = self.create(payload).await?;
        tracing::info!(username = %user.username, id = %user.id, "bootstrap admin created");
        Ok(Some(user))
    }

    /// Check a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] with
    /// [`UnauthorizedError::InvalidCredentials`] for an unknown user or a
    /// wrong password, or a storage error.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, DepotError> {
        let Some((user, hash)) = self.repos.users().find_credentials(username).await? else {
            return Err(UnauthorizedError::InvalidCredentials.into());
        };
        if self.hasher.verify(password, &hash)? {
            Ok(user)
        } else {
            Err(UnauthorizedError::InvalidCredentials.into())
        }
    }

    /// Turn the user id carried by a verified token into the acting user,
    /// with the right currently stored for that account.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] with
    /// [`UnauthorizedError::InvalidToken`] when the account no longer
    /// exists, or a storage error.
    pub async fn resolve_actor(&self, id: UserId) -> Result<Actor, DepotError> {
        match self.repos.users().get_by_id(id).await? {
            Some(user) => Ok(Actor::User {
                id: user.id,
                right: user.right,
            }),
            None => {
                Err(UnauthorizedError::InvalidToken(format!("user {id} no longer exists")).into())
            }
        }
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no user with `id` exists,
    /// or a storage error from the repository.
    pub async fn get(&self, id: UserId) -> Result<User, DepotError> {
        self.repos
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::new("User", id).into())
    }

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin, or a storage error.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<User>, DepotError> {
        authorize(actor, Operation::ListUsers)?;
        self.repos.users().get_all().await
    }

    /// Delete a user. Stores it manages keep a dangling manager reference.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Unauthorized`] below Admin,
    /// [`DepotError::NotFound`] when the user does not exist, or a storage
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, actor: &Actor, id: UserId) -> Result<(), DepotError> {
        authorize(actor, Operation::DeleteUser)?;
        if self.repos.users().delete(id).await? {
            Ok(())
        } else {
            Err(NotFoundError::new("User", id).into())
        }
    }

    async fn create(&self, payload: NewUser) -> Result<User, DepotError> {
        payload.validate()?;
        if self
            .repos
            .users()
            .find_credentials(&payload.username)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateUsername(payload.username).into());
        }
        let hash = self.hasher.hash(&payload.password)?;
        self.repos.users().create(&payload, &hash).await
    }
}

impl<P, H> Clone for UserService<P, H> {
    fn clone(&self) -> Self {
        Self {
            repos: Arc::clone(&self.repos),
            hasher: Arc::clone(&self.hasher),
        }
    }
}
