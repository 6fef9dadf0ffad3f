//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `depot.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use depot_domain::user::{NewUser, UserRight};

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Token signing and the bootstrap administrator.
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Authentication configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for bearer tokens. Has no default: the daemon refuses to
    /// start until one is configured.
    pub jwt_secret: String,
    /// Token lifetime in seconds, at most [`MAX_TOKEN_TTL_SECS`].
    pub token_ttl_secs: i64,
    /// Administrator created at startup when missing.
    pub admin: Option<AdminConfig>,
}

/// Bootstrap administrator account.
#[derive(Deserialize)]
pub struct AdminConfig {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    /// Registration payload for this account.
    #[must_use]
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            right: UserRight::Admin,
        }
    }
}

impl Config {
    /// Load configuration from `depot.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("depot.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("DEPOT_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("DEPOT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("DEPOT_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("DEPOT_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("DEPOT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("DEPOT_JWT_SECRET") {
            self.auth.jwt_secret = val;
        }
        if let Some(ttl) = var("DEPOT_TOKEN_TTL_SECS").and_then(|val| val.parse().ok()) {
            self.auth.token_ttl_secs = ttl;
        }

        let username = var("DEPOT_ADMIN_USERNAME");
        let email = var("DEPOT_ADMIN_EMAIL");
        let password = var("DEPOT_ADMIN_PASSWORD");
        if username.is_some() || email.is_some() || password.is_some() {
            let admin = self.auth.admin.get_or_insert_with(|| AdminConfig {
                username: String::new(),
                email: String::new(),
                password: String::new(),
            });
            if let Some(val) = username {
                admin.username = val;
            }
            if let Some(val) = email {
                admin.email = val;
            }
            if let Some(val) = password {
                admin.password = val;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::Validation(
                "jwt secret must be set (auth.jwt_secret or DEPOT_JWT_SECRET)".to_string(),
            ));
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.auth.token_ttl_secs) {
            return Err(ConfigError::Validation(format!(
                "token ttl must be between 1 and {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }
        if let Some(admin) = &self.auth.admin
            && (admin.username.is_empty() || admin.password.is_empty())
        {
            return Err(ConfigError::Validation(
                "bootstrap admin needs both a username and a password".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:depot.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "depotd=info,depot=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: 86_400,
            admin: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn configured() -> Config {
        let mut config = Config::default();
        config.auth.jwt_secret = "s3cret".to_string();
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:depot.db?mode=rwc");
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert!(config.auth.admin.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [auth]
            jwt_secret = 'abc'
            token_ttl_secs = 60

            [auth.admin]
            username = 'root'
            password = 'hunter2'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.auth.jwt_secret, "abc");
        assert_eq!(config.auth.token_ttl_secs, 60);
        let admin = config.auth.admin.unwrap();
        assert_eq!(admin.username, "root");
        assert_eq!(admin.email, "");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = configured();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_refuse_default_config_without_jwt_secret() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[]));
        assert!(config.auth.jwt_secret.is_empty());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("jwt secret")
        ));
    }

    #[test]
    fn should_reject_token_ttl_beyond_one_year() {
        let mut config = configured();
        config.apply_env_overrides(env(&[("DEPOT_TOKEN_TTL_SECS", "9223372036854775807")]));
        assert_eq!(config.auth.token_ttl_secs, i64::MAX);
        assert!(config.validate().is_err());

        config.auth.token_ttl_secs = MAX_TOKEN_TTL_SECS;
        assert!(config.validate().is_ok());

        config.auth.token_ttl_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_partial_bootstrap_admin() {
        let mut config = configured();
        config.apply_env_overrides(env(&[("DEPOT_ADMIN_USERNAME", "root")]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults_once_secret_is_set() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("DEPOT_BIND", "127.0.0.1:8080"),
            ("DEPOT_DATABASE_URL", "sqlite::memory:"),
            ("DEPOT_JWT_SECRET", "xyz"),
            ("DEPOT_TOKEN_TTL_SECS", "120"),
            ("DEPOT_ADMIN_USERNAME", "root"),
            ("DEPOT_ADMIN_PASSWORD", "hunter2"),
        ]));

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.auth.jwt_secret, "xyz");
        assert_eq!(config.auth.token_ttl_secs, 120);
        let admin = config.auth.admin.as_ref().unwrap();
        assert_eq!(admin.to_new_user().right, UserRight::Admin);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("DEPOT_PORT", "eighty")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
