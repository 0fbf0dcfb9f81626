//! Source file download
//!
//! Streams a row's source file to local scratch storage in bounded chunks,
//! so memory use stays flat regardless of payload size. The fetcher never
//! retries; failed rows go to the failure sidecar for manual re-runs, and
//! the caller owns partial-file cleanup.

use crate::error::{CliError, Result};
use crate::progress;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Default per-request timeout for downloads.
/// An unbounded hang would pin a worker slot for the rest of the run.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Result of a completed download
#[derive(Debug, Clone, Copy)]
pub struct FetchOutcome {
    pub bytes_written: u64,
}

/// Streaming HTTP downloader
pub struct Fetcher {
    client: reqwest::Client,
    show_progress: bool,
}

impl Fetcher {
    /// Create a fetcher with the given request timeout
    ///
    /// Progress bars are suppressed when multiple workers share the
    /// terminal; byte progress is advisory either way.
    pub fn new(timeout_secs: u64, show_progress: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("arkup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    /// Download `url` to `dest`, streaming the body chunk by chunk
    ///
    /// On any transport error (connection failure, non-2xx status, timeout
    /// mid-stream) the destination may hold a partial payload; the caller
    /// must remove it.
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<FetchOutcome> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CliError::transport(format!(
                "HTTP status {} for {}",
                status, url
            )));
        }

        let total = response.content_length();
        let bar = self
            .show_progress
            .then(|| progress::download_bar(total, crate::encode::url_basename(url)));

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
            if let Some(ref bar) = bar {
                bar.set_position(bytes_written);
            }
        }

        file.flush().await?;
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        Ok(FetchOutcome { bytes_written })
    }
}
