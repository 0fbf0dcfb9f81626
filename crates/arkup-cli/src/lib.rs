//! Arkup CLI Library
//!
//! Batch-uploads files referenced by a CSV manifest to an S3-compatible
//! archive service, attaching per-row metadata.
//!
//! # Overview
//!
//! One CSV in, a set of remote objects out, plus a run log and a failure
//! sidecar:
//!
//! - **Upload**: download each row's source file, derive an identifier,
//!   and archive it with metadata (`arkup upload`)
//! - **Delete**: remove the identifiers a manifest names (`arkup delete`)
//!
//! Rows are processed by a fixed-size worker pool; each row fails
//! independently and failed source URLs are appended to a sidecar file for
//! manual re-runs.

pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod encode;
pub mod error;
pub mod failures;
pub mod fetch;
pub mod identifier;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod progress;
pub mod store;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use manifest::Manifest;

use crate::dispatcher::DEFAULT_WORKERS;
use crate::fetch::DEFAULT_FETCH_TIMEOUT_SECS;
use crate::identifier::IdPolicy;
use crate::store::DEFAULT_UPLOAD_ATTEMPTS;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default upper bound in seconds for the per-row pacing delay.
pub const DEFAULT_SLEEP_CEILING_SECS: f64 = 3.0;

/// Arkup - CSV-manifest batch uploader for archive storage
#[derive(Parser, Debug)]
#[command(name = "arkup")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload manifest rows to the archive
    Upload(UploadArgs),

    /// Delete the identifiers a manifest names
    Delete(DeleteArgs),
}

/// Arguments for `arkup upload`
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Path to the CSV manifest
    pub manifest: PathBuf,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Identifier derivation policy
    #[arg(long, value_enum, default_value_t = IdPolicy::Hash)]
    pub id_policy: IdPolicy,

    /// Leave rows whose identifier is already archived untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Classification metadata field attached to every uploaded object
    #[arg(long)]
    pub mediatype: Option<String>,

    /// Failure sidecar path (failed source URLs, one per line)
    #[arg(long, default_value = "failed.txt")]
    pub failures: PathBuf,

    /// Upper bound in seconds for the per-row pacing delay
    #[arg(long, default_value_t = DEFAULT_SLEEP_CEILING_SECS)]
    pub sleep_ceiling: f64,

    /// Download timeout in seconds
    #[arg(long, default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout: u64,

    /// Upload attempts per row before the row is declared failed
    #[arg(long, default_value_t = DEFAULT_UPLOAD_ATTEMPTS)]
    pub upload_attempts: u32,

    /// INI keys file with an [s3] section (access, secret)
    #[arg(long, env = "ARKUP_KEYS_FILE")]
    pub keys: Option<PathBuf>,
}

/// Arguments for `arkup delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Path to the CSV manifest
    pub manifest: PathBuf,

    /// Number of concurrent workers
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Identifier derivation policy
    #[arg(long, value_enum, default_value_t = IdPolicy::Hash)]
    pub id_policy: IdPolicy,

    /// Upper bound in seconds for the per-row pacing delay
    #[arg(long, default_value_t = DEFAULT_SLEEP_CEILING_SECS)]
    pub sleep_ceiling: f64,

    /// INI keys file with an [s3] section (access, secret)
    #[arg(long, env = "ARKUP_KEYS_FILE")]
    pub keys: Option<PathBuf>,
}
