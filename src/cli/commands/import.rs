//! Import command implementation
//!
//! Runs the importer over one survey table and reports the outcome.

use super::shared::{ProcessingStats, generate_final_report, setup_logging};
use crate::Result;
use crate::app::services::importer::Importer;
use crate::cli::args::{ImportArgs, OutputFormat};
use std::time::Instant;
use tracing::{debug, info};

/// Import command runner
pub async fn run_import(args: ImportArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    debug!("Command line arguments: {:?}", args);

    let stats = import(&args).await?;
    let stats = ProcessingStats {
        processing_time: start_time.elapsed(),
        ..stats
    };

    if !(args.logging.quiet && args.logging.report == OutputFormat::Human) {
        generate_final_report(args.logging.report, &stats)?;
    }

    Ok(stats)
}

/// Import without touching logging or stdout
pub async fn import(args: &ImportArgs) -> Result<ProcessingStats> {
    let config = args.to_config()?;
    info!(
        "Survey '{}' at locations {}",
        config.metadata.title, config.metadata.locations
    );

    let importer = Importer::new(config)?;
    let outcome = importer.import_file(&args.data).await?;

    Ok(ProcessingStats {
        command: "import".to_string(),
        inputs: vec![args.data.clone()],
        records_read: outcome.stats.records_read,
        records_written: outcome.stats.records_written,
        records_skipped: outcome.stats.records_skipped,
        output_path: outcome.output_path,
        output_size: outcome.bytes_written,
        ..Default::default()
    })
}
