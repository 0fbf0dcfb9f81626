//! Arkup CLI - Main entry point

use arkup_cli::{commands, Cli, Commands};
use arkup_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Console plus a rolling log file by default; environment variables
    // override (LOG_LEVEL, LOG_OUTPUT, LOG_DIR, ...).
    let base = LogConfig::builder()
        .level(if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        })
        .output(LogOutput::Both)
        .log_file_prefix("arkup")
        .build();
    let log_config = base.clone().merge_env().unwrap_or(base);

    // Initialize logging (ignore errors as the CLI should work without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = match cli.command {
        Commands::Upload(args) => commands::upload::run(args).await,
        Commands::Delete(args) => commands::delete::run(args).await,
    };

    // A completed run exits non-zero when any row failed; fatal errors
    // (manifest, credentials) abort before dispatch.
    match result {
        Ok(summary) if summary.failed > 0 => {
            process::exit(1);
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
