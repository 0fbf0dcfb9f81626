//! Error types shared across the Arkup workspace

use thiserror::Error;

/// Result type alias for workspace-level operations
pub type Result<T> = std::result::Result<T, ArkupError>;

/// Error type for shared infrastructure (logging, digests)
#[derive(Error, Debug)]
pub enum ArkupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
