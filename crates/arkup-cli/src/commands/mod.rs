//! CLI command implementations

pub mod delete;
pub mod upload;

use crate::config::ArchiveConfig;
use crate::error::Result;
use crate::store::{ArchiveStore, ObjectStore, RetryPolicy};
use std::path::Path;
use std::sync::Arc;

/// Load credentials and build the archive store
///
/// Fails before any row is dispatched when credentials are missing.
pub(crate) fn build_store(
    keys: Option<&Path>,
    retry: RetryPolicy,
) -> Result<Arc<dyn ObjectStore>> {
    let config = ArchiveConfig::load(keys)?;
    Ok(Arc::new(ArchiveStore::connect(&config, retry)))
}
