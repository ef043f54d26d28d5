//! Configuration for doicheck-core
//!
//! Registry and reader settings. The CLI builds one `DoicheckConfig` at
//! startup and hands references to the components that need them; nothing
//! here is global.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crossref REST endpoint for works
pub const DEFAULT_ENDPOINT: &str = "https://api.crossref.org/works";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoicheckConfig {
    /// Registry client and validation settings
    pub registry: RegistryConfig,
    /// Document reading settings
    pub reader: ReaderConfig,
}

/// Registry connection and validation pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Works endpoint; single works are fetched from `{endpoint}/{doi}`
    pub endpoint: String,
    /// Contact email sent as `mailto` (Crossref polite pool)
    pub mailto: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum outstanding registry requests
    pub max_concurrent: usize,
    /// Retries for transient failures (timeouts, transport errors, 5xx)
    pub max_retries: u32,
    /// First retry delay in milliseconds, doubled on every attempt
    pub initial_backoff_ms: u64,
    /// Upper bound for the retry delay in milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mailto: String::new(),
            timeout_secs: 15,
            max_concurrent: 8,
            max_retries: 2,
            initial_backoff_ms: 250,
            max_backoff_ms: 4_000,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// Document reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Documents larger than this many bytes are read in chunks
    pub max_chunk_size: u64,
    /// Target size of one chunk in bytes (plain text)
    pub chunk_size: usize,
    /// Extensions accepted without the leading dot, compared case-insensitively
    pub accepted_extensions: Vec<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 10 * 1024 * 1024,
            chunk_size: 64 * 1024,
            accepted_extensions: ["doc", "docx", "pdf", "ppt", "pptx", "txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ReaderConfig {
    /// Whether `extension` is in the accepted list
    pub fn accepts(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

impl DoicheckConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values.
    ///
    /// The contact email is not checked here; the registry client rejects a
    /// bad identity when it is constructed, so extraction-only runs work
    /// without one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingField("registry.endpoint".to_string()));
        }

        if self.registry.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "registry.timeout_secs must be positive".to_string(),
            ));
        }

        if self.registry.max_concurrent == 0 {
            return Err(ConfigError::OutOfRange(
                "registry.max_concurrent must be positive".to_string(),
            ));
        }

        if self.registry.initial_backoff_ms > self.registry.max_backoff_ms {
            return Err(ConfigError::OutOfRange(
                "registry.initial_backoff_ms must not exceed registry.max_backoff_ms"
                    .to_string(),
            ));
        }

        if self.reader.chunk_size == 0 {
            return Err(ConfigError::OutOfRange(
                "reader.chunk_size must be positive".to_string(),
            ));
        }

        if self.reader.accepted_extensions.is_empty() {
            return Err(ConfigError::MissingField(
                "reader.accepted_extensions".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
    /// Required field is missing
    #[error("Missing field: {0}")]
    MissingField(String),
    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}
