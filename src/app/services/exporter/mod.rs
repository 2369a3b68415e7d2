//! Survey exporter: collector JSON to delimited survey table
//!
//! The exporter reads the JSON array produced by the collection tool, keeps
//! the measurements that carry both a device RSSI and SNR, flattens each into
//! a survey table row and writes the table as delimited text.
//!
//! ## Architecture
//!
//! - [`mapping`] - Inclusion filter and field derivation per measurement
//! - [`schema`] - Consistency checks of each row against the declared columns
//!   and of each measurement against the first relevant one
//! - [`writer`] - Delimited text rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lora_survey::ExportConfig;
//! use lora_survey::app::services::exporter::Exporter;
//!
//! # async fn example() -> lora_survey::Result<()> {
//! let exporter = Exporter::new(ExportConfig::default())?;
//! let outcome = exporter.export_file(std::path::Path::new("measurements.json")).await?;
//!
//! println!("Wrote {} rows to {}",
//!          outcome.stats.records_written,
//!          outcome.output_path.display());
//! # Ok(())
//! # }
//! ```

pub mod mapping;
pub mod schema;
pub mod writer;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::path::Path;

use chrono_tz::Tz;
use tracing::{debug, info};

use crate::app::models::{RawMeasurement, TabularRecord};
use crate::app::services::output::write_atomic;
use crate::app::services::stats::{ConversionOutcome, ConversionStats};
use crate::config::ExportConfig;
use crate::{Error, Result};

pub use mapping::{is_survey_relevant, to_tabular_record};
pub use schema::{check_record_schema, check_result_keys};
pub use writer::render_table;

/// Rows built from a measurement set, ready to render
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Survey table rows, in input order
    pub records: Vec<TabularRecord>,

    /// Record counts
    pub stats: ConversionStats,
}

/// Collector JSON to survey table converter
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
    timezone: Tz,
}

impl Exporter {
    /// Create an exporter, validating the configuration
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;
        let timezone = config.tz()?;
        Ok(Self { config, timezone })
    }

    /// Configuration in use
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Read and decode the measurement array in `path`
    pub async fn load_measurements(path: &Path) -> Result<Vec<RawMeasurement>> {
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| Error::from_read(path, e))?;

        serde_json::from_slice(&content).map_err(|e| {
            Error::json(
                path.display().to_string(),
                "Expected a JSON array of measurements",
                e,
            )
        })
    }

    /// Filter and flatten measurements into survey table rows
    ///
    /// Fails on the first row that does not fill the declared export columns,
    /// or whose `result` keys differ from the first relevant measurement's.
    pub fn convert(&self, measurements: &[RawMeasurement]) -> Result<ExportResult> {
        let mut stats = ConversionStats::new();
        let mut records = Vec::with_capacity(measurements.len());
        let mut expected_keys: Option<BTreeSet<String>> = None;

        for (index, measurement) in measurements.iter().enumerate() {
            if !is_survey_relevant(measurement) {
                stats.record_skipped();
                debug!("Skipped measurement {}: no device RSSI/SNR", index);
                continue;
            }

            let record = to_tabular_record(measurement, &self.timezone);
            check_record_schema(index, &record)?;

            let expected = expected_keys.get_or_insert_with(|| measurement.result.key_names());
            check_result_keys(index, expected, &measurement.result)?;

            records.push(record);
            stats.record_written();
        }

        Ok(ExportResult { records, stats })
    }

    /// Render rows as delimited text with the configured delimiter
    pub fn render(&self, records: &[TabularRecord]) -> Result<Vec<u8>> {
        render_table(records, self.config.delimiter)
    }

    /// Export the measurements in `input` to the configured output path
    ///
    /// Nothing is written unless every step succeeds.
    pub async fn export_file(&self, input: &Path) -> Result<ConversionOutcome> {
        info!("Exporting survey measurements from {}", input.display());

        let measurements = Self::load_measurements(input).await?;
        debug!("Loaded {} measurements", measurements.len());

        let result = self.convert(&measurements)?;
        let content = self.render(&result.records)?;
        let bytes_written = write_atomic(&self.config.output_path, &content)?;

        info!(
            "Exported {} of {} measurements to {}",
            result.stats.records_written,
            result.stats.records_read,
            self.config.output_path.display()
        );

        Ok(ConversionOutcome {
            stats: result.stats,
            output_path: self.config.output_path.clone(),
            bytes_written,
        })
    }
}
