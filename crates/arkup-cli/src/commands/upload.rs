//! `arkup upload` command implementation
//!
//! Processes every manifest row through the upload pipeline under a
//! bounded worker pool.

use crate::dispatcher::{self, RunSummary};
use crate::error::Result;
use crate::failures::FailureLog;
use crate::fetch::Fetcher;
use crate::manifest::Manifest;
use crate::pipeline::{PipelineContext, RunMode};
use crate::store::RetryPolicy;
use crate::UploadArgs;
use colored::Colorize;
use std::time::Duration;

/// Upload manifest rows to the archive
pub async fn run(args: UploadArgs) -> Result<RunSummary> {
    let store = super::build_store(
        args.keys.as_deref(),
        RetryPolicy {
            max_attempts: args.upload_attempts.max(1),
            ..RetryPolicy::default()
        },
    )?;

    let manifest = Manifest::load(&args.manifest)?;
    if manifest.is_empty() {
        println!("Manifest has no rows; nothing to upload.");
        return Ok(RunSummary::default());
    }

    println!(
        "{} Uploading {} row(s) with {} worker(s)...",
        "→".cyan(),
        manifest.len(),
        args.workers.max(1)
    );

    // Interleaved progress bars are useless noise with a parallel pool.
    let show_progress = args.workers <= 1;
    let fetcher = Fetcher::new(args.fetch_timeout, show_progress)?;

    let failures = FailureLog::create(&args.failures);
    let ctx = PipelineContext {
        store,
        fetcher,
        failures: failures.sender(),
        mode: RunMode::Upload,
        id_policy: args.id_policy,
        skip_existing: args.skip_existing,
        mediatype: args.mediatype.clone(),
        sleep_ceiling: Duration::from_secs_f64(args.sleep_ceiling.max(0.0)),
    };

    let summary = dispatcher::run(&ctx, manifest.into_rows(), args.workers).await;

    drop(ctx);
    failures.close().await?;

    print_summary(&summary);
    if summary.failed > 0 {
        println!(
            "{} Failed source URLs recorded in {}",
            "!".yellow(),
            args.failures.display()
        );
    }

    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    let marker = if summary.failed == 0 {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "\n{} {} uploaded, {} skipped, {} failed",
        marker, summary.done, summary.skipped, summary.failed
    );
}
