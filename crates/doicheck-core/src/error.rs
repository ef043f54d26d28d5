//! Error types for doicheck-core
//!
//! Three scopes, three fates:
//! - `DocumentError` ends processing of one document
//! - `ConfigurationError` ends the whole run
//! - `RegistryRequestFailed` / `FailureReason` is recorded per DOI

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for doicheck operations
pub type Result<T> = std::result::Result<T, DoicheckError>;

/// Main error type for doicheck operations
#[derive(Error, Debug)]
pub enum DoicheckError {
    /// A document could not be read
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Registry identity or endpoint failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// Configuration values could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A single registry request failed
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryRequestFailed),
}

/// Which document check failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidDocumentReason {
    InvalidExtension,
    MissingFile,
    UnsupportedFormat,
}

impl fmt::Display for InvalidDocumentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDocumentReason::InvalidExtension => write!(f, "Extension is not valid"),
            InvalidDocumentReason::MissingFile => write!(f, "File is missing"),
            InvalidDocumentReason::UnsupportedFormat => write!(f, "Format is not supported"),
        }
    }
}

/// Document-level errors
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Rejected before any extraction attempt
    #[error("{reason}. Expected: {expected}. Received: {received}")]
    InvalidDocument {
        reason: InvalidDocumentReason,
        expected: String,
        received: String,
    },

    /// The format parser could not produce text
    #[error("Failed to extract text from {}: {cause}", .path.display())]
    ExtractionFailed { path: PathBuf, cause: String },
}

impl DocumentError {
    pub fn extraction_failed(path: impl Into<PathBuf>, cause: impl fmt::Display) -> Self {
        DocumentError::ExtractionFailed {
            path: path.into(),
            cause: cause.to_string(),
        }
    }

    /// The invalid-document reason, if this is a validation failure
    pub fn invalid_reason(&self) -> Option<InvalidDocumentReason> {
        match self {
            DocumentError::InvalidDocument { reason, .. } => Some(*reason),
            DocumentError::ExtractionFailed { .. } => None,
        }
    }
}

/// Registry client construction errors; fatal for the run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Contact identity is not email-shaped
    #[error("Invalid user mail: {identity:?} is not an email address")]
    BadIdentity { identity: String },

    /// Endpoint is malformed or did not answer the probe with 200
    #[error("Invalid endpoint {endpoint}: {cause}")]
    UnreachableEndpoint { endpoint: String, cause: String },
}

/// Why a single DOI could not be validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
    Timeout,
    NotFound,
    RateLimited,
    Status(u16),
    Transport(String),
    Parse(String),
    Cancelled,
    Internal(String),
}

impl FailureReason {
    /// Transient failures worth another attempt. Every 4xx, 429 included,
    /// fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            FailureReason::Timeout | FailureReason::Transport(_) => true,
            FailureReason::Status(status) => *status >= 500,
            FailureReason::NotFound
            | FailureReason::RateLimited
            | FailureReason::Parse(_)
            | FailureReason::Cancelled
            | FailureReason::Internal(_) => false,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => write!(f, "request timed out"),
            FailureReason::NotFound => write!(f, "not found in registry"),
            FailureReason::RateLimited => write!(f, "rate limited by registry"),
            FailureReason::Status(status) => write!(f, "HTTP status {}", status),
            FailureReason::Transport(msg) => write!(f, "transport error: {}", msg),
            FailureReason::Parse(msg) => write!(f, "invalid registry response: {}", msg),
            FailureReason::Cancelled => write!(f, "cancelled"),
            FailureReason::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

/// A registry call for one DOI failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed API request for {doi}: {cause}")]
pub struct RegistryRequestFailed {
    pub doi: String,
    pub cause: FailureReason,
}

impl RegistryRequestFailed {
    pub fn new(doi: impl Into<String>, cause: FailureReason) -> Self {
        Self {
            doi: doi.into(),
            cause,
        }
    }
}
