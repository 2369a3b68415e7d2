//! LoRaWAN Survey Library
//!
//! A Rust library for moving LoRaWAN radio-survey measurements between the
//! JSON emitted by field collection tools and the delimited text files used
//! by spreadsheets and plotting tools.
//!
//! This library provides tools for:
//! - Flattening collector measurements into the 14-column survey table
//! - Rebuilding survey documents (points with planar coordinates) from that table
//! - Computing colour-scale thresholds across several survey documents
//! - Atomic output writes so a failed run never leaves a partial file behind

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod coercion;
        pub mod exporter;
        pub mod importer;
        pub mod output;
        pub mod stats;
        pub mod thresholds;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{RawMeasurement, SurveyDocument, SurveyPoint, TabularRecord};
pub use config::{ExportConfig, ImportConfig, SurveyMetadata, ThresholdConfig};

/// Result type alias for survey conversions
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for survey conversion runs
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON input could not be decoded or output could not be encoded
    #[error("JSON error in file '{file}': {message}")]
    Json {
        file: String,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Delimited text could not be parsed
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// A record does not populate the declared export columns
    #[error(
        "Schema mismatch at record {record}: missing [{}], unexpected [{}]",
        join_fields(.missing),
        join_fields(.unexpected)
    )]
    SchemaMismatch {
        record: usize,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// Survey document lacks a required section
    #[error("Survey format error in file '{file}': {message}")]
    SurveyFormat { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Run cancelled before completion
    #[error("Processing interrupted: {message}")]
    Interrupted { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(
        file: impl Into<String>,
        message: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Json {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema mismatch error for the record at `record` (zero-based)
    pub fn schema_mismatch(record: usize, missing: Vec<String>, unexpected: Vec<String>) -> Self {
        Self::SchemaMismatch {
            record,
            missing,
            unexpected,
        }
    }

    /// Create a survey format error
    pub fn survey_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SurveyFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an interruption error
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted {
            message: message.into(),
        }
    }

    /// Map a failed input read, reporting a missing file as [`Error::FileNotFound`]
    pub(crate) fn from_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::file_not_found(path.display().to_string())
        } else {
            Self::io(format!("Failed to read {}", path.display()), source)
        }
    }
}

fn join_fields(fields: &[String]) -> String {
    fields.join(", ")
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            file: "unknown".to_string(),
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}
