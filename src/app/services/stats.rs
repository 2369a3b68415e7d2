//! Conversion statistics shared by the export and import services
//!
//! Records dropped by an inclusion filter are not errors; they only show up
//! here as skipped records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Simple conversion statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of input records encountered
    pub records_read: usize,

    /// Number of records written to the output
    pub records_written: usize,

    /// Number of records dropped by the inclusion filter
    pub records_skipped: usize,
}

impl ConversionStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a record that passed the inclusion filter
    pub fn record_written(&mut self) {
        self.records_read += 1;
        self.records_written += 1;
    }

    /// Count a record dropped by the inclusion filter
    pub fn record_skipped(&mut self) {
        self.records_read += 1;
        self.records_skipped += 1;
    }

    /// Calculate the share of input records kept, as a percentage
    pub fn retention_rate(&self) -> f64 {
        if self.records_read == 0 {
            0.0
        } else {
            (self.records_written as f64 / self.records_read as f64) * 100.0
        }
    }
}

/// Result of a conversion run that produced an output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    /// Record counts for the run
    pub stats: ConversionStats,

    /// File the output was written to
    pub output_path: PathBuf,

    /// Size of the output file in bytes
    pub bytes_written: u64,
}
