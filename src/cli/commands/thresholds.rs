//! Thresholds command implementation

use super::shared::{ProcessingStats, generate_final_report, setup_logging};
use crate::Result;
use crate::app::services::coercion::format_number;
use crate::app::services::thresholds::ThresholdGenerator;
use crate::cli::args::{OutputFormat, ThresholdsArgs};
use std::time::Instant;
use tracing::debug;

/// Thresholds command runner
pub async fn run_thresholds(args: ThresholdsArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.logging)?;
    debug!("Command line arguments: {:?}", args);

    let stats = thresholds(&args).await?;
    let stats = ProcessingStats {
        processing_time: start_time.elapsed(),
        ..stats
    };

    if !(args.logging.quiet && args.logging.report == OutputFormat::Human) {
        generate_final_report(args.logging.report, &stats)?;
    }

    Ok(stats)
}

/// Compute thresholds without touching logging or stdout
pub async fn thresholds(args: &ThresholdsArgs) -> Result<ProcessingStats> {
    let generator = ThresholdGenerator::new(args.to_config()?);
    let outcome = generator.generate(&args.surveys).await?;

    let details = outcome
        .table
        .iter()
        .map(|(metric, range)| {
            (
                metric.to_string(),
                format!("{} .. {}", format_number(range.min), format_number(range.max)),
            )
        })
        .collect();

    Ok(ProcessingStats {
        command: "thresholds".to_string(),
        inputs: args.surveys.clone(),
        records_read: outcome.points,
        records_written: outcome.table.len(),
        output_path: outcome.output_path,
        output_size: outcome.bytes_written,
        details,
        ..Default::default()
    })
}
