//! Worker pool dispatcher
//!
//! Fans manifest rows out to the row pipeline under a fixed concurrency
//! bound. Rows fail independently; completion order is unconstrained.

use crate::manifest::Row;
use crate::pipeline::{process_row, PipelineContext, RowOutcome};
use futures::stream::{self, StreamExt};
use tracing::info;

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 3;

/// Terminal outcome counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub done: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Total rows that reached a terminal state
    pub fn total(&self) -> usize {
        self.done + self.skipped + self.failed
    }
}

/// Run the row pipeline over every manifest row with bounded concurrency
///
/// At most `workers` rows are in flight at once; each runs to its terminal
/// state regardless of how its peers fare.
pub async fn run(ctx: &PipelineContext, rows: Vec<Row>, workers: usize) -> RunSummary {
    let workers = workers.max(1);
    let total = rows.len();
    info!(rows = total, workers, "Dispatching manifest");

    let mut summary = RunSummary::default();
    let mut outcomes = stream::iter(rows)
        .map(|row| process_row(ctx, row))
        .buffer_unordered(workers);

    while let Some(outcome) = outcomes.next().await {
        match outcome {
            RowOutcome::Done => summary.done += 1,
            RowOutcome::Skipped => summary.skipped += 1,
            RowOutcome::Failed => summary.failed += 1,
        }
    }

    info!(
        done = summary.done,
        skipped = summary.skipped,
        failed = summary.failed,
        "Manifest processed"
    );
    summary
}
