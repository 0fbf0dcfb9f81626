//! Remote archive object store
//!
//! The archive service is an S3-compatible API: one object per identifier.
//! `head_object` answers existence, `put_object` uploads with per-field
//! metadata, `delete_object` removes. Upload retry is owned here, by the
//! sink's contract, with an explicit policy; the row pipeline performs none.

use crate::config::ArchiveConfig;
use crate::error::{CliError, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

// ============================================================================
// Retry Policy Constants
// ============================================================================

/// Default upload attempts before a row is declared failed.
pub const DEFAULT_UPLOAD_ATTEMPTS: u32 = 3;

/// Default fixed delay between upload attempts, in seconds.
pub const DEFAULT_RETRY_BACKOFF_SECS: u64 = 5;

/// Explicit retry policy for sink uploads
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_UPLOAD_ATTEMPTS,
            backoff: Duration::from_secs(DEFAULT_RETRY_BACKOFF_SECS),
        }
    }
}

/// Existence oracle and object sink for the remote archive
///
/// The trait seam keeps the row pipeline testable without a network; the
/// production implementation is [`ArchiveStore`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Report whether an object already exists under `identifier`
    async fn exists(&self, identifier: &str) -> Result<bool>;

    /// Upload a local file plus metadata under `identifier`
    async fn upload(
        &self,
        identifier: &str,
        path: &Path,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Delete the object under `identifier`; warns and no-ops when absent
    async fn delete(&self, identifier: &str) -> Result<()>;
}

/// S3-backed archive store
pub struct ArchiveStore {
    client: Client,
    bucket: String,
    retry: RetryPolicy,
}

impl ArchiveStore {
    /// Build a store from archive configuration and a retry policy
    pub fn connect(config: &ArchiveConfig, retry: RetryPolicy) -> Self {
        debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "Initializing archive store");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "arkup-archive",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        Self {
            client,
            bucket: config.bucket.clone(),
            retry,
        }
    }
}

#[async_trait]
impl ObjectStore for ArchiveStore {
    async fn exists(&self, identifier: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(identifier)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(CliError::transport(format!(
                        "Existence check failed for '{}': {}",
                        identifier, service_err
                    )))
                }
            }
        }
    }

    async fn upload(
        &self,
        identifier: &str,
        path: &Path,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()> {
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            let body = ByteStream::from_path(path)
                .await
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

            let mut request = self
                .client
                .put_object()
                .bucket(&self.bucket)
                .key(identifier)
                .body(body);

            for (field, value) in metadata {
                request = request.metadata(field, value);
            }

            match request.send().await {
                Ok(_) => {
                    info!(identifier = %identifier, "Uploaded to s3://{}/{}", self.bucket, identifier);
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        identifier = %identifier,
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %err,
                        "Upload attempt failed"
                    );
                    last_error = Some(err);

                    if attempt < self.retry.max_attempts {
                        tokio::time::sleep(self.retry.backoff).await;
                    }
                }
            }
        }

        Err(CliError::transport(format!(
            "Upload failed for '{}' after {} attempts: {}",
            identifier,
            self.retry.max_attempts,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    async fn delete(&self, identifier: &str) -> Result<()> {
        if !self.exists(identifier).await? {
            warn!(identifier = %identifier, "Item not found for deletion");
            return Ok(());
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(identifier)
            .send()
            .await
            .map_err(|e| {
                CliError::transport(format!("Delete failed for '{}': {}", identifier, e))
            })?;

        info!(identifier = %identifier, "Deleted s3://{}/{}", self.bucket, identifier);
        Ok(())
    }
}
