//! Command-line argument definitions for the survey converter
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Each subcommand maps onto one conversion service and its configuration.

use crate::config::{ExportConfig, ImportConfig, Locations, SurveyMetadata, ThresholdConfig};
use crate::constants::{
    DEFAULT_EXPORT_PATH, DEFAULT_IMPORT_PATH, DEFAULT_SURVEY_TITLE, DEFAULT_THRESHOLDS_PATH,
    DEFAULT_TIMEZONE,
};
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the LoRaWAN survey converter
///
/// Moves radio-survey measurements between the collector's JSON output, the
/// delimited survey table and the survey document used for heat maps.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lora-survey",
    version,
    about = "Convert LoRaWAN survey measurements between JSON and delimited text",
    long_about = "Converts LoRaWAN radio-survey measurements collected in the field into a \
                  14-column delimited survey table, turns a completed survey table back into a \
                  survey document with floor-plan coordinates, and computes shared colour-scale \
                  thresholds across survey documents."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Export collector JSON measurements to a delimited survey table
    Export(ExportArgs),
    /// Import a delimited survey table into a survey document
    Import(ImportArgs),
    /// Compute colour-scale thresholds across survey documents
    Thresholds(ThresholdsArgs),
}

/// Logging and report flags shared by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct LoggingArgs {
    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Format of the run summary printed on stdout
    #[arg(
        long = "report",
        value_enum,
        default_value = "human",
        help = "Format of the run summary"
    )]
    pub report: OutputFormat,
}

/// Survey metadata flags shared by export and import
#[derive(Debug, Clone, ClapArgs)]
pub struct MetadataArgs {
    /// Survey title
    #[arg(
        short = 't',
        long = "title",
        value_name = "TITLE",
        default_value = DEFAULT_SURVEY_TITLE,
        help = "Survey title"
    )]
    pub title: String,

    /// Survey location bounds
    #[arg(
        short = 'l',
        long = "locations",
        value_name = "LIST",
        default_value = "[0,0,0,0]",
        help = "Survey location bounds as a bracketed list, e.g. \"[0,0,120,80]\""
    )]
    pub locations: Locations,
}

impl MetadataArgs {
    /// Build the survey metadata from the flags
    pub fn metadata(&self) -> SurveyMetadata {
        SurveyMetadata::default()
            .with_title(self.title.clone())
            .with_locations(self.locations.clone())
    }
}

impl Default for MetadataArgs {
    fn default() -> Self {
        Self {
            title: DEFAULT_SURVEY_TITLE.to_string(),
            locations: Locations::default(),
        }
    }
}

/// Arguments for the export command (JSON to delimited text)
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Collector JSON file holding an array of measurements
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "JSON file with the collected measurements"
    )]
    pub data: PathBuf,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Destination of the survey table
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_EXPORT_PATH,
        help = "Survey table to write"
    )]
    pub output: PathBuf,

    /// Field delimiter of the survey table
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ";",
        value_parser = parse_delimiter,
        help = "Field delimiter"
    )]
    pub delimiter: u8,

    /// Timezone used to render measurement times
    #[arg(
        long = "timezone",
        value_name = "TZ",
        default_value = DEFAULT_TIMEZONE,
        help = "IANA timezone for the Time column"
    )]
    pub timezone: String,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the import command (delimited text to JSON)
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Survey table to read (ISO-8859-1)
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "Delimited survey table to import"
    )]
    pub data: PathBuf,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    /// Destination of the survey document
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_IMPORT_PATH,
        help = "Survey document to write"
    )]
    pub output: PathBuf,

    /// Field delimiter of the survey table
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ";",
        value_parser = parse_delimiter,
        help = "Field delimiter"
    )]
    pub delimiter: u8,

    /// Write indented JSON
    #[arg(long = "pretty", help = "Write indented JSON instead of compact JSON")]
    pub pretty: bool,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Arguments for the thresholds command
#[derive(Debug, Clone, Parser)]
pub struct ThresholdsArgs {
    /// Survey documents to span
    #[arg(value_name = "SURVEY", required = true, num_args = 1..)]
    pub surveys: Vec<PathBuf>,

    /// Destination of the thresholds document
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_THRESHOLDS_PATH,
        help = "Thresholds document to write"
    )]
    pub output: PathBuf,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Parse a single-character delimiter
fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            value
        )),
    }
}

impl LoggingArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl ExportArgs {
    /// Build and validate the exporter configuration
    pub fn to_config(&self) -> Result<ExportConfig> {
        let config = ExportConfig::default()
            .with_output_path(self.output.clone())
            .with_delimiter(self.delimiter)
            .with_timezone(self.timezone.clone())
            .with_metadata(self.metadata.metadata());
        config.validate()?;
        Ok(config)
    }
}

impl ImportArgs {
    /// Build and validate the importer configuration
    pub fn to_config(&self) -> Result<ImportConfig> {
        let mut config = ImportConfig::default()
            .with_output_path(self.output.clone())
            .with_delimiter(self.delimiter)
            .with_metadata(self.metadata.metadata());
        if self.pretty {
            config = config.with_pretty();
        }
        config.validate()?;
        Ok(config)
    }
}

impl ThresholdsArgs {
    /// Build the threshold configuration
    pub fn to_config(&self) -> Result<ThresholdConfig> {
        if self.surveys.is_empty() {
            return Err(Error::configuration(
                "At least one survey document is required",
            ));
        }
        Ok(ThresholdConfig::default().with_output_path(self.output.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(arguments: &[&str]) -> Commands {
        Args::try_parse_from(arguments).unwrap().command.unwrap()
    }

    #[test]
    fn test_export_defaults() {
        let Commands::Export(args) = parse(&["lora-survey", "export", "--data", "m.json"]) else {
            panic!("Expected export command");
        };

        assert_eq!(args.data, PathBuf::from("m.json"));
        assert_eq!(args.output, PathBuf::from("survey.csv"));
        assert_eq!(args.delimiter, b';');
        assert_eq!(args.timezone, "Europe/Zurich");
        assert_eq!(args.metadata.title, "LoRaWAN Survey");
        assert_eq!(args.metadata.locations, Locations(vec![0, 0, 0, 0]));
        assert_eq!(args.logging.report, OutputFormat::Human);
    }

    #[test]
    fn test_export_options() {
        let Commands::Export(args) = parse(&[
            "lora-survey",
            "export",
            "--data",
            "m.json",
            "--title",
            "Level 2",
            "--locations",
            "[1,2,300,400]",
            "--delimiter",
            ",",
            "-o",
            "out/level2.csv",
            "-vv",
        ]) else {
            panic!("Expected export command");
        };

        assert_eq!(args.metadata.title, "Level 2");
        assert_eq!(args.metadata.locations, Locations(vec![1, 2, 300, 400]));
        assert_eq!(args.delimiter, b',');

        let config = args.to_config().unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/level2.csv"));
        assert_eq!(config.metadata.title, "Level 2");
        assert_eq!(args.logging.get_log_level(), "debug");
    }

    #[test]
    fn test_data_is_required() {
        let error = Args::try_parse_from(["lora-survey", "export"]).unwrap_err();
        assert_eq!(error.exit_code(), 2);

        let error = Args::try_parse_from(["lora-survey", "import", "--pretty"]).unwrap_err();
        assert_eq!(error.exit_code(), 2);

        let error = Args::try_parse_from(["lora-survey", "thresholds"]).unwrap_err();
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_invalid_locations_rejected() {
        let result = Args::try_parse_from([
            "lora-survey",
            "export",
            "--data",
            "m.json",
            "--locations",
            "[1,two]",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_import_options() {
        let Commands::Import(args) = parse(&[
            "lora-survey",
            "import",
            "--data",
            "survey.csv",
            "--pretty",
            "--report",
            "json",
        ]) else {
            panic!("Expected import command");
        };

        let config = args.to_config().unwrap();
        assert!(config.pretty);
        assert_eq!(config.output_path, PathBuf::from("../data/Sample.json"));
        assert_eq!(args.logging.report, OutputFormat::Json);
    }

    #[test]
    fn test_thresholds_surveys() {
        let Commands::Thresholds(args) = parse(&["lora-survey", "thresholds", "a.json", "b.json"])
        else {
            panic!("Expected thresholds command");
        };

        assert_eq!(args.surveys.len(), 2);
        assert_eq!(
            args.to_config().unwrap().output_path,
            PathBuf::from("thresholds.json")
        );
    }

    #[test]
    fn test_delimiter_parsing() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("\t"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = LoggingArgs::default();

        // Default level
        assert_eq!(args.get_log_level(), "warn");

        // Verbose levels
        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 2;
        assert_eq!(args.get_log_level(), "debug");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        // Quiet mode
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from([
            "lora-survey",
            "import",
            "--data",
            "s.csv",
            "-q",
            "-v",
        ]);
        assert!(result.is_err());
    }
}
