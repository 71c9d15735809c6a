//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Every key has a default so a bare `cargo run` serves a
//! local `flaskr.db` with the `admin`/`admin` credential pair.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::FlaskrError;
use crate::persistence::Schema;

/// Top-level service configuration.
///
/// Loaded once at startup via [`FlaskrConfig::from_env`].
#[derive(Debug, Clone)]
pub struct FlaskrConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5000`).
    pub listen_addr: SocketAddr,

    /// Entry store settings.
    pub store: StoreConfig,

    /// The fixed credential pair and session signing secret.
    pub auth: AuthConfig,

    /// Emit logs as JSON lines instead of human-readable text.
    pub json_logs: bool,
}

/// Entry store connection settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// SQLite connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub connect_timeout_secs: u64,

    /// Table/column naming scheme.
    pub schema: Schema,
}

/// Credentials and session secret.
#[derive(Clone)]
pub struct AuthConfig {
    /// The single accepted username.
    pub username: String,
    /// The single accepted password.
    pub password: String,
    /// Key used to sign session cookies.
    pub secret_key: String,
}

// Secrets stay out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    /// Checks that the settings can sign sessions.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Config`] if the secret key is empty.
    pub fn validate(&self) -> Result<(), FlaskrError> {
        if self.secret_key.is_empty() {
            return Err(FlaskrError::Config("SECRET_KEY must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
            secret_key: "my_precious".to_string(),
        }
    }
}

impl FlaskrConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`FlaskrError::Config`] if `LISTEN_ADDR` cannot be parsed,
    /// `STORE_SCHEMA` names an unknown scheme, or `SECRET_KEY` is empty.
    pub fn from_env() -> Result<Self, FlaskrError> {
        dotenvy::dotenv().ok();

        let listen_addr = parse_listen_addr(&env_or("LISTEN_ADDR", "0.0.0.0:5000"))?;

        let schema = Schema::from_str(&env_or("STORE_SCHEMA", "entries"))?;

        let store = StoreConfig {
            database_url: env_or("DATABASE_URL", "sqlite://flaskr.db?mode=rwc"),
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5),
            connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            schema,
        };

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            username: env_or("FLASKR_USERNAME", &defaults.username),
            password: env_or("FLASKR_PASSWORD", &defaults.password),
            secret_key: env_or("SECRET_KEY", &defaults.secret_key),
        };
        auth.validate()?;

        let json_logs = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            listen_addr,
            store,
            auth,
            json_logs,
        })
    }
}

/// Parses the `LISTEN_ADDR` value.
///
/// # Errors
///
/// Returns [`FlaskrError::Config`] naming the rejected value.
pub fn parse_listen_addr(raw: &str) -> Result<SocketAddr, FlaskrError> {
    raw.parse()
        .map_err(|e| FlaskrError::Config(format!("LISTEN_ADDR {raw:?}: {e}")))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
