//! Survey importer: delimited survey table to survey document
//!
//! The importer reads a survey table (as written by the exporter and then
//! completed by hand with floor-plan coordinates), keeps the rows that carry
//! a counter and writes them as the survey document consumed by the heat-map
//! tooling.
//!
//! ## Architecture
//!
//! - [`reader`] - ISO-8859-1 decoding and positional row parsing
//! - [`mapping`] - Row filter and survey point construction

pub mod mapping;
pub mod reader;

#[cfg(test)]
mod tests;

use std::path::Path;

use tracing::{debug, info};

use crate::app::models::{SurveyDocument, TabularRecord};
use crate::app::services::output::write_atomic;
use crate::app::services::stats::{ConversionOutcome, ConversionStats};
use crate::config::ImportConfig;
use crate::{Error, Result};

pub use mapping::{build_document, include_row, to_survey_point};
pub use reader::{decode_text, read_rows};

/// Survey table to survey document converter
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    /// Create an importer, validating the configuration
    pub fn new(config: ImportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Read and parse the survey table in `path`
    pub async fn load_rows(&self, path: &Path) -> Result<Vec<TabularRecord>> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::from_read(path, e))?;

        let text = decode_text(&bytes);
        read_rows(&text, self.config.delimiter, &path.display().to_string())
    }

    /// Build the survey document from parsed rows
    pub fn convert(&self, records: &[TabularRecord]) -> (SurveyDocument, ConversionStats) {
        let mut stats = ConversionStats::new();
        let mut points = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            if include_row(record) {
                points.push(to_survey_point(record));
                stats.record_written();
            } else {
                stats.record_skipped();
                debug!("Skipped row {}: no counter", index + 1);
            }
        }

        (build_document(points), stats)
    }

    /// Encode the document as JSON, compact unless pretty output is configured
    pub fn render(&self, document: &SurveyDocument) -> Result<Vec<u8>> {
        let encoded = if self.config.pretty {
            serde_json::to_vec_pretty(document)
        } else {
            serde_json::to_vec(document)
        };

        encoded.map_err(|e| {
            Error::json(
                self.config.output_path.display().to_string(),
                "Failed to encode survey document",
                e,
            )
        })
    }

    /// Import the survey table in `input` to the configured output path
    pub async fn import_file(&self, input: &Path) -> Result<ConversionOutcome> {
        info!("Importing survey table from {}", input.display());

        let records = self.load_rows(input).await?;
        debug!("Parsed {} rows", records.len());

        let (document, stats) = self.convert(&records);
        let content = self.render(&document)?;
        let bytes_written = write_atomic(&self.config.output_path, &content)?;

        info!(
            "Imported {} survey points to {}",
            stats.records_written,
            self.config.output_path.display()
        );

        Ok(ConversionOutcome {
            stats,
            output_path: self.config.output_path.clone(),
            bytes_written,
        })
    }
}
