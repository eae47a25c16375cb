//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at process
//! start. A missing required value halts startup.

use std::env;
use std::fmt;

/// Startup configuration error. Fatal: the process must not serve requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Clone)]
pub struct Config {
    /// Database connection URL (Supabase PostgreSQL)
    pub database_url: String,

    /// Supabase GoTrue endpoint and public API key
    pub supabase_url: String,
    pub supabase_anon_key: String,

    /// Shared HS256 secret used to re-sign session tokens. Must match the
    /// provider's JWT secret so that stripped tokens verify upstream.
    pub jwt_secret: String,

    /// Auth provider implementation (supabase, mock)
    pub auth_provider: String,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("auth_provider", &self.auth_provider)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let auth_provider = lookup("AUTH_PROVIDER").unwrap_or_else(|| "supabase".to_string());

        // The mock provider runs in-process; it has no upstream to reach
        let (supabase_url, supabase_anon_key) = if auth_provider == "mock" {
            (
                lookup("SUPABASE_URL").unwrap_or_default(),
                lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
            )
        } else {
            (required("SUPABASE_URL")?, required("SUPABASE_ANON_KEY")?)
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("'{}' is not a port number", raw),
            })?,
            None => 8000,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            supabase_url,
            supabase_anon_key,
            jwt_secret: required("JWT_SECRET")?,
            auth_provider,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "artcafe=debug".to_string()),
            port,
        })
    }
}
