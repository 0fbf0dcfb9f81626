//! Error types for the Arkup CLI
//!
//! Per-row errors (missing fields, transport failures, remote conflicts)
//! are caught at the row-pipeline boundary and converted into a log line
//! and an outcome; only manifest and credential errors abort a run.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Required column absent for the chosen identifier policy; fatal to that row only
    #[error("Row is missing required column '{0}'")]
    MissingField(String),

    /// Manifest file is unreadable or structurally invalid; fatal to the run
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// CSV parsing failed; fatal to the run
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A row's source URL could not be parsed or re-encoded; fatal to that row only
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network failure during existence check, download, or upload; row is
    /// recorded as failed and the run continues
    #[error("Transport error: {0}")]
    Transport(String),

    /// HTTP request failed
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Identifier already exists remotely and skip mode is disabled
    #[error("Item already exists: {0}")]
    AlreadyExists(String),

    /// Scratch file or sidecar operation failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Credentials or endpoint configuration is missing or invalid; fatal to the run
    #[error("Configuration error: {0}")]
    Config(String),

    /// Shared infrastructure error (logging, digests)
    #[error(transparent)]
    Common(#[from] arkup_common::ArkupError),
}

impl CliError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(msg: impl Into<String>) -> Self {
        Self::InvalidManifest(msg.into())
    }

    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
