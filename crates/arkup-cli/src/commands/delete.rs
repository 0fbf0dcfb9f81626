//! `arkup delete` command implementation
//!
//! Resolves each manifest row's identifier and deletes the corresponding
//! remote object. Nothing is downloaded; absent identifiers are warned
//! about and skipped by the store itself.

use crate::dispatcher::{self, RunSummary};
use crate::error::Result;
use crate::failures::FailureLog;
use crate::fetch::{Fetcher, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::manifest::Manifest;
use crate::pipeline::{PipelineContext, RunMode};
use crate::store::RetryPolicy;
use crate::DeleteArgs;
use colored::Colorize;
use std::time::Duration;

/// Delete the identifiers a manifest names
pub async fn run(args: DeleteArgs) -> Result<RunSummary> {
    let store = super::build_store(args.keys.as_deref(), RetryPolicy::default())?;

    let manifest = Manifest::load(&args.manifest)?;
    if manifest.is_empty() {
        println!("Manifest has no rows; nothing to delete.");
        return Ok(RunSummary::default());
    }

    println!(
        "{} Deleting {} item(s) with {} worker(s)...",
        "→".cyan(),
        manifest.len(),
        args.workers.max(1)
    );

    // Delete runs never fetch or record failures; the sidecar stays unwritten.
    let failures = FailureLog::create("failed.txt");
    let ctx = PipelineContext {
        store,
        fetcher: Fetcher::new(DEFAULT_FETCH_TIMEOUT_SECS, false)?,
        failures: failures.sender(),
        mode: RunMode::Delete,
        id_policy: args.id_policy,
        skip_existing: false,
        mediatype: None,
        sleep_ceiling: Duration::from_secs_f64(args.sleep_ceiling.max(0.0)),
    };

    let summary = dispatcher::run(&ctx, manifest.into_rows(), args.workers).await;

    drop(ctx);
    failures.close().await?;

    let marker = if summary.failed == 0 {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "\n{} {} deleted, {} failed",
        marker, summary.done, summary.failed
    );

    Ok(summary)
}
