//! Shared components for CLI commands
//!
//! This module contains the run statistics, logging setup and report
//! rendering used by every subcommand.

use crate::cli::args::{LoggingArgs, OutputFormat};
use crate::{Error, Result};
use colored::Colorize;
use indicatif::HumanDuration;
use std::path::PathBuf;
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Name of the command that ran
    pub command: String,
    /// Input files read
    pub inputs: Vec<PathBuf>,
    /// Number of input records (measurements, rows or survey points)
    pub records_read: usize,
    /// Number of records written to the output
    pub records_written: usize,
    /// Number of records dropped by the inclusion filter
    pub records_skipped: usize,
    /// File the output was written to
    pub output_path: PathBuf,
    /// Output file size in bytes
    pub output_size: u64,
    /// Total processing time
    pub processing_time: std::time::Duration,
    /// Extra summary lines as label/value pairs
    pub details: Vec<(String, String)>,
}

impl ProcessingStats {
    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging from the verbosity flags
///
/// The filter comes from the flags alone; no environment variable is read.
pub fn setup_logging(args: &LoggingArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::new(format!("lora_survey={}", log_level));

    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    initialized
        .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Print the run summary in the requested format
pub fn generate_final_report(format: OutputFormat, stats: &ProcessingStats) -> Result<()> {
    info!("Generating final report");

    match format {
        OutputFormat::Human => generate_human_report(stats),
        OutputFormat::Json => generate_json_report(stats),
        OutputFormat::Csv => generate_csv_report(stats),
    }
}

/// Generate human-readable report
fn generate_human_report(stats: &ProcessingStats) -> Result<()> {
    let duration = HumanDuration(stats.processing_time);

    println!(
        "\n{} {}",
        "✓".green().bold(),
        format!("Survey {} complete", stats.command).bold()
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Summary:");
    for input in &stats.inputs {
        println!("   • Input: {}", input.display());
    }
    println!("   • Records read: {}", stats.records_read);
    println!("   • Records written: {}", stats.records_written);
    if stats.records_skipped > 0 {
        println!(
            "   • Records skipped: {}",
            stats.records_skipped.to_string().yellow()
        );
    }
    println!(
        "   • Output: {} ({})",
        stats.output_path.display(),
        ProcessingStats::format_size(stats.output_size)
    );
    println!("   • Processing time: {}", duration);

    if !stats.details.is_empty() {
        println!();
        for (label, value) in &stats.details {
            println!("   • {}: {}", label, value);
        }
    }

    println!();
    Ok(())
}

/// Generate JSON report for machine consumption
fn generate_json_report(stats: &ProcessingStats) -> Result<()> {
    let json_stats = serde_json::json!({
        "command": stats.command,
        "inputs": stats.inputs,
        "records_read": stats.records_read,
        "records_written": stats.records_written,
        "records_skipped": stats.records_skipped,
        "output_path": stats.output_path,
        "output_size_bytes": stats.output_size,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "details": stats.details.iter().map(|(label, value)| {
            serde_json::json!({ "label": label, "value": value })
        }).collect::<Vec<_>>()
    });

    println!("{}", serde_json::to_string_pretty(&json_stats)?);
    Ok(())
}

/// Generate CSV report for data analysis
fn generate_csv_report(stats: &ProcessingStats) -> Result<()> {
    println!("metric,value");
    println!("command,{}", stats.command);
    println!("records_read,{}", stats.records_read);
    println!("records_written,{}", stats.records_written);
    println!("records_skipped,{}", stats.records_skipped);
    println!("output_size_bytes,{}", stats.output_size);
    println!(
        "processing_time_seconds,{}",
        stats.processing_time.as_secs_f64()
    );

    Ok(())
}
