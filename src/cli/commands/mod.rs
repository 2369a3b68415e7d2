//! Command implementations for the survey converter CLI
//!
//! Each subcommand is implemented in its own module:
//! - `export`: collector JSON to delimited survey table
//! - `import`: delimited survey table to survey document
//! - `thresholds`: colour-scale ranges across survey documents

pub mod export;
pub mod import;
pub mod shared;
pub mod thresholds;

pub use shared::ProcessingStats;

use crate::cli::args::Commands;
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler. Each handler sets up logging,
/// runs its service and prints the run summary.
pub async fn run(command: Commands) -> Result<ProcessingStats> {
    match command {
        Commands::Export(args) => export::run_export(args).await,
        Commands::Import(args) => import::run_import(args).await,
        Commands::Thresholds(args) => thresholds::run_thresholds(args).await,
    }
}

/// Run a command, giving up when CTRL+C arrives first
pub async fn run_until_interrupted(command: Commands) -> Result<ProcessingStats> {
    tokio::select! {
        result = run(command) => result,
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => Err(Error::interrupted("Run interrupted by user")),
            Err(e) => Err(Error::io("Failed to listen for CTRL+C", e)),
        },
    }
}
