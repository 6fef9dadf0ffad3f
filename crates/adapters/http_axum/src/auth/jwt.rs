//! HS256 bearer tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use depot_domain::error::{DepotError, UnauthorizedError};
use depot_domain::id::UserId;
use depot_domain::user::{User, UserRight};

/// Token signing settings.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HMAC secret.
    pub secret: String,
    /// Token lifetime in seconds.
    pub ttl_secs: i64,
    /// Value of the `iss` claim, checked on verification.
    pub issuer: String,
}

/// Token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    pub right: UserRight,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

impl Claims {
    /// The account the token was issued to.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Issues and verifies bearer tokens.
pub struct TokenManager {
    ttl_secs: i64,
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenManager {
    /// Build a manager from its settings.
    #[must_use]
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_secs: config.ttl_secs,
            issuer: config.issuer,
        }
    }

    /// Sign a token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Persistence`] if the lifetime overflows the
    /// calendar or signing fails.
    pub fn issue(&self, user: &User) -> Result<String, DepotError> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                DepotError::Persistence(
                    format!("token lifetime of {} seconds is out of range", self.ttl_secs).into(),
                )
            })?;
        let claims = Claims {
            sub: user.id.get(),
            username: user.username.clone(),
            right: user.right,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| DepotError::Persistence(Box::new(err)))
    }

    /// Verify `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`UnauthorizedError::InvalidToken`] for a bad signature,
    /// a foreign issuer or an expired token.
    pub fn verify(&self, token: &str) -> Result<Claims, DepotError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| {
                let reason = match err.kind() {
                    ErrorKind::ExpiredSignature => "expired".to_string(),
                    ErrorKind::InvalidIssuer => "foreign issuer".to_string(),
                    _ => err.to_string(),
                };
                UnauthorizedError::InvalidToken(reason).into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(secret: &str, ttl_secs: i64) -> TokenManager {
        TokenManager::new(TokenConfig {
            secret: secret.to_string(),
            ttl_secs,
            issuer: "depotd".to_string(),
        })
    }

    fn user() -> User {
        User {
            id: UserId::new(7),
            username: "ada".to_string(),
            email: "ada@example.org".to_string(),
            right: UserRight::Member,
        }
    }

    #[test]
    fn should_verify_issued_token() {
        let tokens = manager("s3cret", 3600);
        let token = tokens.issue(&user()).unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id(), UserId::new(7));
        assert_eq!(claims.right, UserRight::Member);
        assert_eq!(claims.iss, "depotd");
    }

    #[test]
    fn should_reject_token_signed_with_other_secret() {
        let token = manager("one", 3600).issue(&user()).unwrap();
        assert!(matches!(
            manager("two", 3600).verify(&token),
            Err(DepotError::Unauthorized(UnauthorizedError::InvalidToken(_)))
        ));
    }

    #[test]
    fn should_fail_instead_of_overflowing_on_huge_lifetime() {
        let tokens = manager("s3cret", i64::MAX);
        assert!(matches!(
            tokens.issue(&user()),
            Err(DepotError::Persistence(_))
        ));
    }

    #[test]
    fn should_reject_expired_token() {
        let tokens = manager("s3cret", -3600);
        let token = tokens.issue(&user()).unwrap();
        assert!(matches!(
            tokens.verify(&token),
            Err(DepotError::Unauthorized(UnauthorizedError::InvalidToken(reason))) if reason == "expired"
        ));
    }
}
