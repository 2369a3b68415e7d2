//! Configuration management and validation.
//!
//! Provides the per-command configuration structures with their documented
//! defaults, plus the survey metadata accepted on the command line.

use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_EXPORT_PATH, DEFAULT_IMPORT_PATH, DEFAULT_LOCATIONS,
    DEFAULT_SURVEY_TITLE, DEFAULT_THRESHOLDS_PATH, DEFAULT_TIMEZONE,
};
use crate::{Error, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Survey metadata passed alongside the input file
///
/// Accepted by both conversion commands and logged, but it does not feed
/// into the field mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyMetadata {
    /// Survey title
    pub title: String,

    /// Corner locations of the surveyed area
    pub locations: Locations,
}

impl Default for SurveyMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_SURVEY_TITLE.to_string(),
            locations: Locations::default(),
        }
    }
}

impl SurveyMetadata {
    /// Set a custom title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set custom corner locations
    pub fn with_locations(mut self, locations: Locations) -> Self {
        self.locations = locations;
        self
    }
}

/// Corner locations, written on the command line as `[a,b,c,d]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locations(pub Vec<i64>);

impl Default for Locations {
    fn default() -> Self {
        Self(DEFAULT_LOCATIONS.to_vec())
    }
}

impl FromStr for Locations {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s.trim().trim_start_matches('[').trim_end_matches(']');

        let values = inner
            .split(',')
            .map(str::trim)
            .map(|part| {
                part.parse::<i64>().map_err(|_| {
                    Error::configuration(format!("Invalid location '{}' in '{}'", part, s))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self(values))
    }
}

impl fmt::Display for Locations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(i64::to_string).collect();
        write!(f, "[{}]", parts.join(","))
    }
}

/// Configuration for the JSON to delimited text direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Destination of the delimited file
    pub output_path: PathBuf,

    /// Field delimiter
    pub delimiter: u8,

    /// IANA timezone used to render measurement times
    pub timezone: String,

    /// Survey metadata
    pub metadata: SurveyMetadata,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            delimiter: DEFAULT_DELIMITER,
            timezone: DEFAULT_TIMEZONE.to_string(),
            metadata: SurveyMetadata::default(),
        }
    }
}

impl ExportConfig {
    /// Set a custom output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set a custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set a custom timezone
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set survey metadata
    pub fn with_metadata(mut self, metadata: SurveyMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Resolve the configured timezone
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| Error::configuration(format!("Unknown timezone: {}", self.timezone)))
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> Result<()> {
        validate_delimiter(self.delimiter)?;
        self.tz()?;
        Ok(())
    }
}

/// Configuration for the delimited text to JSON direction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Destination of the survey document
    pub output_path: PathBuf,

    /// Field delimiter
    pub delimiter: u8,

    /// Write indented JSON instead of compact JSON
    pub pretty: bool,

    /// Survey metadata
    pub metadata: SurveyMetadata,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_IMPORT_PATH),
            delimiter: DEFAULT_DELIMITER,
            pretty: false,
            metadata: SurveyMetadata::default(),
        }
    }
}

impl ImportConfig {
    /// Set a custom output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set a custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enable indented JSON output
    pub fn with_pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Set survey metadata
    pub fn with_metadata(mut self, metadata: SurveyMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Validate the configuration before a run
    pub fn validate(&self) -> Result<()> {
        validate_delimiter(self.delimiter)
    }
}

/// Configuration for threshold generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Destination of the thresholds document
    pub output_path: PathBuf,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_THRESHOLDS_PATH),
        }
    }
}

impl ThresholdConfig {
    /// Set a custom output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

fn validate_delimiter(delimiter: u8) -> Result<()> {
    if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\n' | b'\r') {
        return Err(Error::configuration(format!(
            "Unsupported delimiter: {:?}",
            delimiter as char
        )));
    }
    Ok(())
}
