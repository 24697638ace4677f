//! Configuration module for doorkeep.

use serde::Deserialize;
use std::path::Path;

use crate::{DoorkeepError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL used when building password-reset links.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// CORS allowed origins. Empty means permissive (development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_public_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: default_public_url(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/doorkeep.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication and token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for session tokens (must be set).
    #[serde(default)]
    pub session_secret: String,
    /// Base secret for password-reset tokens. Kept separate from the
    /// session secret so the two can be rotated independently.
    #[serde(default)]
    pub reset_secret: String,
    /// Session token lifetime in days.
    #[serde(default = "default_session_ttl_days")]
    pub session_ttl_days: i64,
    /// Password-reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl_mins")]
    pub reset_ttl_mins: i64,
    /// Whether the session cookie carries the Secure flag (HTTPS only).
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_session_ttl_days() -> i64 {
    5
}

fn default_reset_ttl_mins() -> i64 {
    15
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            reset_secret: String::new(),
            session_ttl_days: default_session_ttl_days(),
            reset_ttl_mins: default_reset_ttl_mins(),
            cookie_secure: false,
        }
    }
}

/// Outbound SMTP configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// Sender identity for outbound mail.
    #[serde(default = "default_from_address")]
    pub from_address: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "Doorkeep <no-reply@localhost>".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/doorkeep.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Outbound mail configuration.
    #[serde(default)]
    pub mail: MailConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DoorkeepError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DoorkeepError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DOORKEEP_SESSION_SECRET`: session token signing secret
    /// - `DOORKEEP_RESET_SECRET`: password-reset token base secret
    /// - `DOORKEEP_SMTP_PASSWORD`: SMTP relay password
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("DOORKEEP_SESSION_SECRET") {
            if !secret.is_empty() {
                self.auth.session_secret = secret;
            }
        }
        if let Ok(secret) = std::env::var("DOORKEEP_RESET_SECRET") {
            if !secret.is_empty() {
                self.auth.reset_secret = secret;
            }
        }
        if let Ok(password) = std::env::var("DOORKEEP_SMTP_PASSWORD") {
            if !password.is_empty() {
                self.mail.smtp_password = password;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - either signing secret is unset
    /// - the public URL does not parse
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_secret.is_empty() {
            return Err(DoorkeepError::Config(
                "auth.session_secret is not set. Set it in config.toml or via \
                 DOORKEEP_SESSION_SECRET."
                    .to_string(),
            ));
        }
        if self.auth.reset_secret.is_empty() {
            return Err(DoorkeepError::Config(
                "auth.reset_secret is not set. Set it in config.toml or via \
                 DOORKEEP_RESET_SECRET."
                    .to_string(),
            ));
        }
        if url::Url::parse(&self.server.public_url).is_err() {
            return Err(DoorkeepError::Config(format!(
                "server.public_url is not a valid URL: {}",
                self.server.public_url
            )));
        }
        Ok(())
    }
}
