//! Runtime configuration pulled from the environment at startup.
//!
//! Missing optional values disable the feature they back (email goes
//! quiet without a provider key); the store settings are validated when
//! the backend is constructed.

use std::env;

use anyhow::{bail, Result};

/// Default listen address for the HTTP server.
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Default sender identity for outbound email.
pub const DEFAULT_FROM_EMAIL: &str = "Symposium <noreply@resend.dev>";

/// Which registration store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted Postgres reached over its REST interface.
    Supabase,
    /// Process-local store for tests and demos.
    Memory,
}

impl StoreBackend {
    pub fn parse(value: &str) -> Result<StoreBackend> {
        match value.trim().to_lowercase().as_str() {
            "supabase" => Ok(StoreBackend::Supabase),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("unsupported STORE_BACKEND '{other}' (expected 'supabase' or 'memory')"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: String,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub resend_api_key: Option<String>,
    pub notification_email: Option<String>,
    pub from_email: String,
    /// Default log filter; `RUST_LOG` still takes precedence.
    pub log_level: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        let store_backend = match optional("STORE_BACKEND") {
            Some(value) => StoreBackend::parse(&value)?,
            None => StoreBackend::Supabase,
        };

        Ok(Config {
            http_addr: optional("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
            store_backend,
            supabase_url: optional("SUPABASE_URL"),
            supabase_service_key: optional("SUPABASE_SERVICE_ROLE_KEY"),
            resend_api_key: optional("RESEND_API_KEY"),
            notification_email: optional("NOTIFICATION_EMAIL"),
            from_email: optional("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Read a variable, treating unset and blank the same way.
fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
