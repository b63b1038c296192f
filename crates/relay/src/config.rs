//! Relay configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RELAY_SMTP_USERNAME` - SMTP account username (also the default sender)
//! - `RELAY_SMTP_PASSWORD` - SMTP account password / app password
//!
//! ## Optional
//! - `RELAY_HOST` - Bind address (default: 127.0.0.1)
//! - `RELAY_PORT` - Listen port (default: 3001)
//! - `RELAY_SMTP_HOST` - SMTP server (default: smtp.gmail.com)
//! - `RELAY_SMTP_PORT` - SMTP port (default: 587)
//! - `FROM_ADDRESS` - Sender address (default: `RELAY_SMTP_USERNAME`)
//! - `OWNER_EMAIL` - Notification recipient (default: `RELAY_SMTP_USERNAME`)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Relay application configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SMTP delivery configuration
    pub smtp: SmtpConfig,
    /// Address notifications are delivered to (the site owner)
    pub owner_address: String,
}

/// SMTP transport configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("RELAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RELAY_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_PORT".to_string(), e.to_string()))?;

        let username = get_required_env("RELAY_SMTP_USERNAME")?;
        let password = SecretString::from(get_required_env("RELAY_SMTP_PASSWORD")?);
        let smtp_host = get_env_or_default("RELAY_SMTP_HOST", "smtp.gmail.com");
        let smtp_port = get_env_or_default("RELAY_SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_SMTP_PORT".to_string(), e.to_string()))?;
        let from_address = get_env_or_default("FROM_ADDRESS", &username);
        let owner_address = get_env_or_default("OWNER_EMAIL", &username);

        Ok(Self {
            host,
            port,
            smtp: SmtpConfig {
                host: smtp_host,
                port: smtp_port,
                username,
                password,
                from_address,
            },
            owner_address,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_smtp_config_debug_redacts_password() {
        let config = SmtpConfig {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: "owner@gmail.com".to_string(),
            password: SecretString::from("app-password"),
            from_address: "owner@gmail.com".to_string(),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("app-password"));
    }
}
