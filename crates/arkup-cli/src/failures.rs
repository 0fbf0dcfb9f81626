//! Failure sidecar file
//!
//! Source URLs that fail download or upload are appended to a sidecar file
//! (one URL per line) so the operator can re-run just the failures. All
//! appends are routed through a single writer task fed by a channel:
//! concurrent workers can never interleave or truncate each other's lines,
//! which naive append-mode opens from multiple tasks do not guarantee.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

/// Cloneable handle used by workers to record a failed source URL
#[derive(Clone)]
pub struct FailureSender {
    tx: mpsc::UnboundedSender<String>,
}

impl FailureSender {
    /// Record a failed source URL
    ///
    /// Best-effort: a closed writer is logged, never propagated, because a
    /// bookkeeping failure must not fail the row twice.
    pub fn record(&self, url: &str) {
        if self.tx.send(url.to_string()).is_err() {
            error!(url = %url, "Failure sidecar writer is gone; URL not recorded");
        }
    }
}

/// The failure sidecar: owns the single writer task
pub struct FailureLog {
    tx: mpsc::UnboundedSender<String>,
    writer: JoinHandle<std::io::Result<()>>,
}

impl FailureLog {
    /// Create the sidecar writer for `path`
    ///
    /// The file is opened lazily on the first record, so runs with no
    /// failures leave no sidecar behind.
    pub fn create(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer = tokio::spawn(async move {
            let mut file: Option<tokio::fs::File> = None;
            while let Some(url) = rx.recv().await {
                if file.is_none() {
                    file = Some(open_append(&path).await?);
                }
                if let Some(f) = file.as_mut() {
                    // One write per record keeps lines atomic within this task.
                    f.write_all(format!("{}\n", url).as_bytes()).await?;
                    f.flush().await?;
                }
            }
            Ok(())
        });

        Self { tx, writer }
    }

    /// A cloneable sender for worker tasks
    pub fn sender(&self) -> FailureSender {
        FailureSender {
            tx: self.tx.clone(),
        }
    }

    /// Close the sidecar: stop accepting records and flush the writer
    ///
    /// Outstanding senders keep the channel open; drop them before calling.
    pub async fn close(self) -> Result<()> {
        let Self { tx, writer } = self;
        drop(tx);
        match writer.await {
            Ok(result) => result.map_err(Into::into),
            Err(join_err) => {
                error!(error = %join_err, "Failure sidecar writer task panicked");
                Ok(())
            }
        }
    }
}

async fn open_append(path: &Path) -> std::io::Result<tokio::fs::File> {
    tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
}
