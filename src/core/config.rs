//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults, then environment variables
//! (a `.env` file is honoured), then command-line overrides applied by the
//! binary.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the service-account key file.
pub const KEY_FILE_ENV: &str = "MCP_PLAY_KEY_FILE";

/// Standard Google variable, consulted when `MCP_PLAY_KEY_FILE` is unset.
pub const GOOGLE_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const DEFAULT_API_BASE_URL: &str =
    "https://androidpublisher.googleapis.com/androidpublisher/v3/applications";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Service-account credentials.
    pub credentials: CredentialsConfig,

    /// Android Publisher API access.
    pub publisher: PublisherConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the service-account key.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Path to the service-account JSON key file.
    pub key_file: Option<PathBuf>,
}

/// The key path is not secret but points at one; keep it out of logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("key_file", &self.key_file.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Configuration for Android Publisher API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Base URL of the `applications` collection.
    pub api_base_url: String,

    /// Per-request timeout, applied to API and token calls alike.
    pub request_timeout_secs: u64,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "google-play".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            publisher: PublisherConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server variables are prefixed with `MCP_`, for example
    /// `MCP_SERVER_NAME` or `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials.key_file = std::env::var_os(KEY_FILE_ENV)
            .or_else(|| std::env::var_os(GOOGLE_CREDENTIALS_ENV))
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        if let Ok(base_url) = std::env::var("MCP_PLAY_API_BASE_URL") {
            info!("Using Android Publisher API base URL {}", base_url);
            config.publisher.api_base_url = base_url;
        }

        if let Some(timeout) = std::env::var("MCP_PLAY_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.publisher.request_timeout_secs = timeout;
        }

        config
    }

    /// Override the key file path (command-line flag).
    pub fn with_key_file(mut self, key_file: impl Into<PathBuf>) -> Self {
        self.credentials.key_file = Some(key_file.into());
        self
    }

    /// Check that the server can start with this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.key_file().is_none() {
            return Err(Error::config(format!(
                "no service account key file: pass --key-file or set {} or {}",
                KEY_FILE_ENV, GOOGLE_CREDENTIALS_ENV
            )));
        }
        if self.publisher.request_timeout_secs == 0 {
            return Err(Error::config("request timeout must be at least one second"));
        }
        Ok(())
    }

    /// The configured key file path, if any.
    pub fn key_file(&self) -> Option<&Path> {
        self.credentials.key_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_key_env() {
        unsafe {
            std::env::remove_var(KEY_FILE_ENV);
            std::env::remove_var(GOOGLE_CREDENTIALS_ENV);
        }
    }

    #[test]
    fn test_key_file_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_key_env();
        unsafe {
            std::env::set_var(KEY_FILE_ENV, "/secrets/play.json");
        }
        let config = Config::from_env();
        assert_eq!(config.key_file(), Some(Path::new("/secrets/play.json")));
        clear_key_env();
    }

    #[test]
    fn test_key_file_falls_back_to_google_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_key_env();
        unsafe {
            std::env::set_var(GOOGLE_CREDENTIALS_ENV, "/secrets/adc.json");
        }
        let config = Config::from_env();
        assert_eq!(config.key_file(), Some(Path::new("/secrets/adc.json")));
        clear_key_env();
    }

    #[test]
    fn test_missing_key_file_fails_validation() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_key_env();
        let config = Config::from_env();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("--key-file"));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default().with_key_file("/cli/key.json");
        assert!(config.validate().is_ok());
        assert_eq!(config.key_file(), Some(Path::new("/cli/key.json")));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default().with_key_file("/cli/key.json");
        config.publisher.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            key_file: Some(PathBuf::from("/home/me/super-secret.json")),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super-secret"));
    }
}
