//! Configuration management for the temperature service
//!
//! Configuration is layered: built-in defaults, an optional TOML file, then
//! environment variables. The weather API key has no default and must come
//! from the file or from `WEATHER_API_KEY`.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::lookup::locality::DEFAULT_POSTAL_BASE_URL;
use crate::lookup::weather::DEFAULT_WEATHER_BASE_URL;

/// Environment variable holding the weather API key
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// External collaborators
    pub upstream: UpstreamConfig,

    /// Lookup orchestration
    pub lookup: LookupConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Log every request through the trace layer
    pub enable_request_logging: bool,
}

/// External API configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Postal lookup (ViaCEP) base URL
    pub postal_base_url: String,

    /// Weather API base URL
    pub weather_base_url: String,

    /// Weather API key
    pub weather_api_key: String,

    /// Per-request transport timeout in seconds
    pub request_timeout_secs: u64,
}

/// Lookup orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Overall deadline for one lookup, in milliseconds
    pub deadline_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            enable_cors: true,
            enable_request_logging: true,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            postal_base_url: String::from(DEFAULT_POSTAL_BASE_URL),
            weather_base_url: String::from(DEFAULT_WEATHER_BASE_URL),
            weather_api_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.weather_api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("UpstreamConfig")
            .field("postal_base_url", &self.postal_base_url)
            .field("weather_base_url", &self.weather_base_url)
            .field("weather_api_key", &key)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { deadline_ms: 5000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from defaults overlaid with environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse TOML config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Load from an optional file, then layer the environment on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields with any environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(key) = env_var(API_KEY_ENV) {
            self.upstream.weather_api_key = key;
        }

        if let Some(addr) = env_var("CEP_BIND_ADDRESS") {
            self.server.bind_address = addr
                .parse()
                .map_err(|_| Error::config(format!("Invalid CEP_BIND_ADDRESS: {addr}")))?;
        }

        if let Some(url) = env_var("CEP_POSTAL_BASE_URL") {
            self.upstream.postal_base_url = url;
        }

        if let Some(url) = env_var("CEP_WEATHER_BASE_URL") {
            self.upstream.weather_base_url = url;
        }

        if let Some(secs) = env_var("CEP_REQUEST_TIMEOUT") {
            self.upstream.request_timeout_secs = secs
                .parse()
                .map_err(|_| Error::config(format!("Invalid CEP_REQUEST_TIMEOUT: {secs}")))?;
        }

        if let Some(ms) = env_var("CEP_DEADLINE_MS") {
            self.lookup.deadline_ms = ms
                .parse()
                .map_err(|_| Error::config(format!("Invalid CEP_DEADLINE_MS: {ms}")))?;
        }

        if let Some(level) = env_var("CEP_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = env_var("CEP_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.upstream.weather_api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "weather_api_key is required (set {API_KEY_ENV} or [upstream].weather_api_key)"
            )));
        }

        for (field, value) in [
            ("postal_base_url", &self.upstream.postal_base_url),
            ("weather_base_url", &self.upstream.weather_base_url),
        ] {
            Url::parse(value)
                .map_err(|e| Error::config(format!("Invalid {field} '{value}': {e}")))?;
        }

        if self.upstream.request_timeout_secs == 0 {
            return Err(Error::config("request_timeout_secs must be greater than 0"));
        }

        if self.lookup.deadline_ms == 0 {
            return Err(Error::config("deadline_ms must be greater than 0"));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config(format!(
                "Unknown log format '{}', expected text or json",
                self.logging.format
            )));
        }

        Ok(())
    }

    /// Per-request transport timeout
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.request_timeout_secs)
    }

    /// Overall lookup deadline
    #[must_use]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.lookup.deadline_ms)
    }
}

/// Read a non-empty environment variable
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
