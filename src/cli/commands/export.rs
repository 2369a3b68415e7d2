//! Export command implementation
//!
//! Runs the exporter over one collector JSON file and reports the outcome.

use super::shared::{ProcessingStats, generate_final_report, setup_logging};
use crate::Result;
use crate::app::services::exporter::Exporter;
use crate::cli::args::{ExportArgs, OutputFormat};
use std::time::Instant;
use tracing::{debug, info};

/// Export command runner
pub async fn run_export(args: ExportArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    debug!("Command line arguments: {:?}", args);

    let stats = export(&args).await?;
    let stats = ProcessingStats {
        processing_time: start_time.elapsed(),
        ..stats
    };

    if !(args.logging.quiet && args.logging.report == OutputFormat::Human) {
        generate_final_report(args.logging.report, &stats)?;
    }

    Ok(stats)
}

/// Export without touching logging or stdout
pub async fn export(args: &ExportArgs) -> Result<ProcessingStats> {
    let config = args.to_config()?;
    info!(
        "Survey '{}' at locations {}",
        config.metadata.title, config.metadata.locations
    );

    let exporter = Exporter::new(config)?;
    let outcome = exporter.export_file(&args.data).await?;

    Ok(ProcessingStats {
        command: "export".to_string(),
        inputs: vec![args.data.clone()],
        records_read: outcome.stats.records_read,
        records_written: outcome.stats.records_written,
        records_skipped: outcome.stats.records_skipped,
        output_path: outcome.output_path,
        output_size: outcome.bytes_written,
        details: vec![(
            "Retention".to_string(),
            format!("{:.1}%", outcome.stats.retention_rate()),
        )],
        ..Default::default()
    })
}
