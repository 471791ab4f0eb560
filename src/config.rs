//! Runtime configuration read from the environment.
//!
//! Database settings follow the `DB_*` variables used by the deployment
//! scripts, and skill inference is switched on by `GEMINI_API_KEY`. Both
//! configurations can be built from an arbitrary lookup function so tests
//! never touch the process environment.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// `PostgreSQL` connection pool type shared by the Diesel adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Model used for skill inference unless `INFERENCE_MODEL` overrides it.
pub const DEFAULT_INFERENCE_MODEL: &str = "gemini-2.5-flash";

/// Errors raised while reading configuration or building resources from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable could not be parsed.
    #[error("invalid value {value:?} for {key}: expected a number")]
    InvalidNumber {
        /// Variable name.
        key: &'static str,
        /// Raw value found in the environment.
        value: String,
    },
    /// The connection pool could not be created.
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Login role.
    pub user: String,
    /// Login password; may be empty.
    pub password: String,
    /// Database name.
    pub name: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5433,
            user: "postgres".to_owned(),
            password: String::new(),
            name: "task_assignment".to_owned(),
            pool_size: 10,
        }
    }
}

impl DatabaseConfig {
    /// Reads `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_POOL_SIZE` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup, falling back to the
    /// defaults for unset or blank variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] when a numeric variable is
    /// malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: text_or(&lookup, "DB_HOST", defaults.host),
            port: number_or(&lookup, "DB_PORT", defaults.port)?,
            user: text_or(&lookup, "DB_USER", defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            name: text_or(&lookup, "DB_NAME", defaults.name),
            pool_size: number_or(&lookup, "DB_POOL_SIZE", defaults.pool_size)?,
        })
    }

    /// Renders the `postgres://` connection URL.
    #[must_use]
    pub fn database_url(&self) -> String {
        let credentials = if self.password.is_empty() {
            self.user.clone()
        } else {
            format!("{}:{}", self.user, self.password)
        };
        format!(
            "postgres://{credentials}@{}:{}/{}",
            self.host, self.port, self.name
        )
    }

    /// Builds an r2d2 connection pool for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot open its initial
    /// connections.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.database_url());
        let pool = Pool::builder().max_size(self.pool_size).build(manager)?;
        tracing::info!(
            host = %self.host,
            port = self.port,
            database = %self.name,
            pool_size = self.pool_size,
            "database pool ready"
        );
        Ok(pool)
    }
}

/// Settings for the optional skill inference adapter.
#[derive(Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Gemini API key; inference is disabled without one.
    pub api_key: Option<String>,
    /// Model name passed to the API.
    pub model: String,
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

impl InferenceConfig {
    /// Reads `GEMINI_API_KEY` and `INFERENCE_MODEL` from the process
    /// environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from a variable lookup. A blank API key
    /// counts as absent.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            model: text_or(&lookup, "INFERENCE_MODEL", DEFAULT_INFERENCE_MODEL.to_owned()),
        }
    }

    /// Returns whether an API key is configured.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

fn text_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: String) -> String {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}

fn number_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key).filter(|value| !value.trim().is_empty()) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
