//! Environment configuration
//!
//! Database credentials arrive either as a full `DATABASE_URL` or as the
//! split `APP_DB_*` variables used by container deployments.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default Postgres port when `APP_DB_PORT` is unset
const DEFAULT_DB_PORT: &str = "5432";

/// Default TLS mode when `APP_DB_SSLMODE` is unset
const DEFAULT_SSL_MODE: &str = "require";

/// Load `.env` from the current directory if present.
///
/// Variables already set in the environment are not overwritten. Runs before
/// argument parsing so `env = ...` fallbacks see the file, which is also
/// before tracing exists; the caller logs the returned path.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Split database settings (`APP_DB_*`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub username: String,
    pub password: String,
    pub name: String,
    pub host: String,
    pub port: String,
    pub ssl_mode: String,
}

impl DbSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (testable).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).with_context(|| {
                format!("{key} not set. Set DATABASE_URL or the APP_DB_* variables")
            })
        };

        Ok(Self {
            username: required("APP_DB_USERNAME")?,
            password: lookup("APP_DB_PASSWORD").unwrap_or_default(),
            name: required("APP_DB_NAME")?,
            host: required("APP_DB_HOST")?,
            port: lookup("APP_DB_PORT").unwrap_or_else(|| DEFAULT_DB_PORT.to_owned()),
            ssl_mode: lookup("APP_DB_SSLMODE").unwrap_or_else(|| DEFAULT_SSL_MODE.to_owned()),
        })
    }

    /// Postgres connection URL with credentials percent-encoded.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            self.host,
            self.port,
            urlencoding::encode(&self.name),
            self.ssl_mode,
        )
    }
}

/// Resolve the database URL: explicit value first, then `APP_DB_*`.
pub fn resolve_database_url(explicit: Option<String>) -> Result<String> {
    match explicit {
        Some(url) => Ok(url),
        None => Ok(DbSettings::from_env()?.database_url()),
    }
}
