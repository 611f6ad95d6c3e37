//! dirmirror CLI - periodic one-way folder synchronization
//!
//! Parses the source, replica, and log file paths plus the sync
//! interval, then runs the scheduler until SIGINT or SIGTERM. With
//! `--once` a single pass runs and the exit code reflects whether it
//! completed without errors.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dirmirror_audit::SyncLogger;
use dirmirror_core::config::{Config, DEFAULT_INTERVAL_SECS};
use dirmirror_core::domain::TreeRoot;
use dirmirror_sync::{Scheduler, SyncEngine};

#[derive(Debug, Parser)]
#[command(
    name = "dirmirror",
    version,
    about = "Periodically mirrors a source folder into a replica folder"
)]
struct Cli {
    /// Folder to mirror from
    source_folder: PathBuf,

    /// Folder to mirror into (created if missing)
    replica_folder: PathBuf,

    /// File receiving one log line per file operation
    log_file: PathBuf,

    /// Seconds to wait between the end of one pass and the next
    #[arg(short, long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let source_root =
        TreeRoot::new(cli.source_folder).context("Invalid source folder path")?;
    let replica_root =
        TreeRoot::new(cli.replica_folder).context("Invalid replica folder path")?;

    let config = Config::new(source_root, replica_root, cli.log_file).with_interval(cli.interval);

    let engine = Arc::new(SyncEngine::new(&config.sync));
    let reporter: Arc<dyn dirmirror_core::ports::SyncReporter> =
        Arc::new(SyncLogger::new(&config.logging.file));

    if cli.once {
        let report = Scheduler::run_single_pass(engine, reporter).await;
        let clean = report.is_some_and(|r| !r.has_errors());
        return Ok(if clean {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let shutdown = CancellationToken::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let scheduler = Scheduler::new(Duration::from_secs(config.sync.interval_secs), shutdown);
    scheduler.run(engine, reporter).await;

    Ok(ExitCode::SUCCESS)
}
