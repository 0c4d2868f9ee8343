//! Configuration module for Filebox.

use serde::Deserialize;
use std::path::Path;

use crate::{FileboxError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Metadata database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/files_manager.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Content storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Directory holding uploaded file content.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    /// Maximum decoded upload size in megabytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size_mb: u64,
}

fn default_storage_path() -> String {
    "/tmp/files_manager".to_string()
}

fn default_max_upload_size() -> u64 {
    10
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            max_upload_size_mb: default_max_upload_size(),
        }
    }
}

impl FilesConfig {
    /// Maximum decoded upload size in bytes, saturating on huge values.
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_size_mb.saturating_mul(1024 * 1024)
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session store backend ("memory" or "database").
    #[serde(default = "default_session_backend")]
    pub backend: String,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// How often expired sessions are purged, in seconds.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_session_backend() -> String {
    "memory".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Scheme used to hash new passwords ("sha1" or "argon2").
    #[serde(default = "default_password_scheme")]
    pub password_scheme: String,
}

fn default_password_scheme() -> String {
    "sha1".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_scheme: default_password_scheme(),
        }
    }
}

/// Thumbnail generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailConfig {
    /// Whether image uploads enqueue thumbnail jobs.
    #[serde(default = "default_thumbnails_enabled")]
    pub enabled: bool,
    /// Thumbnail widths in pixels.
    #[serde(default = "default_thumbnail_sizes")]
    pub sizes: Vec<u32>,
    /// Maximum number of pending jobs.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_thumbnails_enabled() -> bool {
    true
}

fn default_thumbnail_sizes() -> Vec<u32> {
    vec![500, 250, 100]
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: default_thumbnails_enabled(),
            sizes: default_thumbnail_sizes(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty means console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// File storage configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Session configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Thumbnail configuration.
    #[serde(default)]
    pub thumbnails: ThumbnailConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FileboxError::Io)?;
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
        toml::from_str(s).map_err(|e| FileboxError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `PORT`: listen port
    /// - `DB_DATABASE`: metadata database file
    /// - `FOLDER_PATH`: content storage directory
    /// - `SESSION_BACKEND`: session store backend
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = env_value("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = env_value("DB_DATABASE") {
            self.database.path = path;
        }
        if let Some(path) = env_value("FOLDER_PATH") {
            self.files.storage_path = path;
        }
        if let Some(backend) = env_value("SESSION_BACKEND") {
            self.session.backend = backend;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.session.backend.as_str(), "memory" | "database") {
            return Err(FileboxError::Config(format!(
                "unknown session backend '{}' (expected \"memory\" or \"database\")",
                self.session.backend
            )));
        }
        if self.session.ttl_secs == 0 {
            return Err(FileboxError::Config(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self
            .auth
            .password_scheme
            .parse::<crate::auth::PasswordScheme>()
            .is_err()
        {
            return Err(FileboxError::Config(format!(
                "unknown password scheme '{}' (expected \"sha1\" or \"argon2\")",
                self.auth.password_scheme
            )));
        }
        if self.thumbnails.enabled && self.thumbnails.sizes.is_empty() {
            return Err(FileboxError::Config(
                "thumbnails are enabled but no sizes are configured".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a non-empty environment variable.
fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
