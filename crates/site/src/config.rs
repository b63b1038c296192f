//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_URL` - Base URL of the hosted table store (e.g., `https://xyz.supabase.co`)
//! - `STORE_API_KEY` - API key for the table store
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_BASE_URL` - Public URL for the site (default: `http://localhost:3000`)
//! - `ADMIN_USERNAME` - Admin login name (default: `admin`)
//! - `ADMIN_PASSWORD` - Admin login password (default: `password123`)
//! - `RELAY_URL` - Email relay base URL (default: `http://localhost:3001`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! Every default exists for local development only. Startup logs a WARN for
//! each default still in effect so a deployment that forgot to override one
//! is visible in the logs.

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Development fallback admin username.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Development fallback admin password.
const DEFAULT_ADMIN_PASSWORD: &str = "password123";
/// Development fallback relay URL.
const DEFAULT_RELAY_URL: &str = "http://localhost:3001";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Remote data store configuration
    pub store: StoreConfig,
    /// Admin session gate configuration
    pub admin: AdminConfig,
    /// Email relay base URL
    pub relay_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Remote data store (hosted table service) configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the table store
    pub url: Url,
    /// API key sent with every request
    pub api_key: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Admin session gate credentials.
///
/// This is a placeholder gate, not a security boundary: plaintext compare,
/// no hashing, no lockout. Implements `Debug` manually to redact the
/// password anyway.
#[derive(Clone)]
pub struct AdminConfig {
    /// Admin login name
    pub username: String,
    /// Admin login password
    pub password: SecretString,
}

impl AdminConfig {
    /// Compare submitted credentials against the configured pair.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("SITE_BASE_URL", "http://localhost:3000");

        let store = StoreConfig::from_env()?;
        let admin = AdminConfig::from_env();
        let relay_url = get_env_or_default_warned("RELAY_URL", DEFAULT_RELAY_URL);
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            store,
            admin,
            relay_url,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("STORE_URL")?;
        let url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("STORE_URL".to_string(), e.to_string()))?;
        let api_key = SecretString::from(get_required_env("STORE_API_KEY")?);
        Ok(Self { url, api_key })
    }
}

impl AdminConfig {
    fn from_env() -> Self {
        Self {
            username: get_env_or_default_warned("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            password: SecretString::from(get_env_or_default_warned(
                "ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD,
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default value, logging a WARN when the
/// default is used. Shipping the defaults is an exposure; make it visible.
fn get_env_or_default_warned(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        tracing::warn!(variable = key, "using development default; override in production");
        default.to_string()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            store: StoreConfig {
                url: Url::parse("https://example.supabase.co").unwrap(),
                api_key: SecretString::from("test-key"),
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: SecretString::from("password123"),
            },
            relay_url: DEFAULT_RELAY_URL.to_string(),
            sentry_dsn: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_admin_credentials_match() {
        let config = test_config();
        assert!(config.admin.matches("admin", "password123"));
        assert!(!config.admin.matches("admin", "wrong"));
        assert!(!config.admin.matches("root", "password123"));
    }

    #[test]
    fn test_store_config_debug_redacts_api_key() {
        let config = test_config();
        let debug_output = format!("{:?}", config.store);
        assert!(debug_output.contains("example.supabase.co"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("test-key"));
    }

    #[test]
    fn test_admin_config_debug_redacts_password() {
        let config = test_config();
        let debug_output = format!("{:?}", config.admin);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("password123"));
    }
}
