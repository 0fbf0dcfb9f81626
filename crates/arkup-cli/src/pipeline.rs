//! Per-row processing pipeline
//!
//! For one manifest row: encode the source URL, resolve the remote
//! identifier, consult the existence oracle, download to scratch storage,
//! normalize metadata, and upload (or delete). Every error is absorbed at
//! this boundary and becomes a log line plus an outcome; one row can never
//! abort the run or another in-flight row. The scratch file is removed on
//! every exit path.

use crate::encode;
use crate::error::{CliError, Result};
use crate::failures::FailureSender;
use crate::fetch::Fetcher;
use crate::identifier::{self, IdPolicy};
use crate::manifest::Row;
use crate::metadata;
use crate::progress;
use crate::store::ObjectStore;
use rand::Rng;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Whether a run uploads manifest rows or deletes their identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Upload,
    Delete,
}

/// Terminal state of one processed row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Uploaded (or deleted) successfully
    Done,
    /// Identifier already archived and skip mode is on
    Skipped,
    /// Any per-row failure; details are in the log and sidecar
    Failed,
}

/// Shared collaborators and options for a run
pub struct PipelineContext {
    pub store: Arc<dyn ObjectStore>,
    pub fetcher: Fetcher,
    pub failures: FailureSender,
    pub mode: RunMode,
    pub id_policy: IdPolicy,
    /// Leave existing remote objects untouched instead of failing the row
    pub skip_existing: bool,
    /// Classification metadata field, when configured
    pub mediatype: Option<String>,
    /// Upper bound for the per-row jittered pacing delay
    pub sleep_ceiling: Duration,
}

/// Process one manifest row to a terminal outcome
///
/// Never returns an error: failures are logged, recorded, and folded into
/// [`RowOutcome::Failed`]. Ends with a jittered pacing delay so a worker
/// does not hammer the remote service between rows.
pub async fn process_row(ctx: &PipelineContext, row: Row) -> RowOutcome {
    let outcome = match run_row(ctx, &row).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "Row failed");
            RowOutcome::Failed
        }
    };

    pace(ctx.sleep_ceiling).await;
    outcome
}

async fn run_row(ctx: &PipelineContext, row: &Row) -> Result<RowOutcome> {
    let url = encode::encode_url(row.file_url()?)?;
    let file_name = encode::url_basename(&url);

    let identifier = identifier::resolve(row, ctx.id_policy)?;

    if ctx.mode == RunMode::Delete {
        ctx.store.delete(&identifier).await?;
        info!(identifier = %identifier, "Deleted item");
        return Ok(RowOutcome::Done);
    }

    if ctx.store.exists(&identifier).await? {
        if ctx.skip_existing {
            info!(identifier = %identifier, file = %file_name, "Item already archived, skipping");
            return Ok(RowOutcome::Skipped);
        }
        return Err(CliError::AlreadyExists(identifier));
    }

    info!(file = %file_name, url = %url, "Starting download");

    let scratch = scratch_file(file_name)?;
    match ctx.fetcher.fetch(&url, scratch.path()).await {
        Ok(outcome) => {
            info!(
                file = %file_name,
                bytes = %progress::format_bytes(outcome.bytes_written),
                path = %scratch.path().display(),
                "Download complete"
            );
        }
        Err(err) => {
            error!(error = %err, url = %url, "Download failed");
            ctx.failures.record(&url);
            scratch.close()?;
            return Ok(RowOutcome::Failed);
        }
    }

    let metadata = metadata::normalize(row, ctx.mediatype.as_deref());

    match ctx.store.upload(&identifier, scratch.path(), &metadata).await {
        Ok(()) => {
            info!(file = %file_name, identifier = %identifier, "Upload complete");
            scratch.close()?;
            Ok(RowOutcome::Done)
        }
        Err(err) => {
            error!(error = %err, file = %file_name, "Upload failed");
            ctx.failures.record(&url);
            scratch.close()?;
            Ok(RowOutcome::Failed)
        }
    }
}

/// Allocate the row's scratch file, keeping the source extension so the
/// uploaded object's content type can be inferred remotely
fn scratch_file(file_name: &str) -> Result<tempfile::NamedTempFile> {
    let suffix = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| format!(".{}", ext));

    let mut builder = tempfile::Builder::new();
    builder.prefix("arkup-");
    if let Some(ref suffix) = suffix {
        builder.suffix(suffix.as_str());
    }
    builder.tempfile().map_err(Into::into)
}

/// Sleep for a uniform random delay in `[0, ceiling]`
///
/// Crude per-worker pacing against remote throttling; not a global rate
/// limit.
async fn pace(ceiling: Duration) {
    if ceiling.is_zero() {
        return;
    }
    let delay = {
        let mut rng = rand::thread_rng();
        Duration::from_secs_f64(rng.gen_range(0.0..=ceiling.as_secs_f64()))
    };
    tokio::time::sleep(delay).await;
}
