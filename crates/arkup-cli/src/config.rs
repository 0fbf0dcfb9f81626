//! Archive service configuration
//!
//! Credentials and endpoint for the S3-compatible archive API. Values are
//! layered: an optional INI-style keys file (section `[s3]`, keys `access`
//! and `secret`) provides the base, environment variables override it.
//! Credential-load failure is surfaced before any row is dispatched.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

// ============================================================================
// Archive Configuration Constants
// ============================================================================

/// Default region sent to S3-compatible endpoints that ignore it.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default bucket holding archived objects.
pub const DEFAULT_BUCKET: &str = "arkup-archive";

/// Default keys file, relative to the user config directory.
pub const DEFAULT_KEYS_FILE: &str = ".config/arkup/keys.ini";

/// Archive service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Custom endpoint URL; `None` targets AWS proper
    pub endpoint: Option<String>,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    /// Path-style addressing, required by most non-AWS S3 endpoints
    pub path_style: bool,
}

impl ArchiveConfig {
    /// Load configuration from the keys file and environment
    ///
    /// `keys_file` of `None` falls back to the default location, which is
    /// skipped silently when absent. Environment variables
    /// (`ARKUP_ACCESS_KEY`, `ARKUP_SECRET_KEY`, `ARKUP_ENDPOINT`,
    /// `ARKUP_REGION`, `ARKUP_BUCKET`, `ARKUP_PATH_STYLE`) take precedence.
    pub fn load(keys_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let (file_access, file_secret) = match keys_file {
            Some(path) => read_keys_file(path, true)?,
            None => match default_keys_file() {
                Some(path) => read_keys_file(&path, false)?,
                None => (None, None),
            },
        };

        let access_key = env::var("ARKUP_ACCESS_KEY").ok().or(file_access);
        let secret_key = env::var("ARKUP_SECRET_KEY").ok().or(file_secret);

        let (access_key, secret_key) = match (access_key, secret_key) {
            (Some(access), Some(secret)) => (access, secret),
            _ => {
                return Err(CliError::config(
                    "Archive credentials not found. Set ARKUP_ACCESS_KEY and \
                     ARKUP_SECRET_KEY, or provide a keys file with an [s3] section.",
                ))
            }
        };

        Ok(Self {
            endpoint: env::var("ARKUP_ENDPOINT").ok(),
            region: env::var("ARKUP_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            bucket: env::var("ARKUP_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            access_key,
            secret_key,
            path_style: env::var("ARKUP_PATH_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}

fn default_keys_file() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    Some(PathBuf::from(home).join(DEFAULT_KEYS_FILE))
}

/// Read `[s3] access` / `[s3] secret` from an INI keys file
///
/// A missing file is an error only when the operator named it explicitly.
fn read_keys_file(path: &Path, required: bool) -> Result<(Option<String>, Option<String>)> {
    if !path.exists() {
        if required {
            return Err(CliError::config(format!(
                "Keys file not found: {}",
                path.display()
            )));
        }
        return Ok((None, None));
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path).format(config::FileFormat::Ini))
        .build()
        .map_err(|e| {
            CliError::config(format!("Failed to parse keys file {}: {}", path.display(), e))
        })?;

    Ok((
        settings.get_string("s3.access").ok(),
        settings.get_string("s3.secret").ok(),
    ))
}
