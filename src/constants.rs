//! Application constants for the survey converter
//!
//! This module contains the column layout of the survey table, default
//! values, and the fixed paths and placeholders used by each command.

// =============================================================================
// Survey Table Layout
// =============================================================================

/// Number of columns in the survey table
pub const COLUMN_COUNT: usize = 14;

/// Column names of the survey table, in file order
///
/// Export writes this header; import ignores whatever header line the file
/// carries and maps fields by position using the same order.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "Time",
    "Compteur",
    "rssi",
    "rssi_min",
    "rssi_max",
    "snr",
    "snr_min",
    "snr_max",
    "gateway_rssi",
    "gateway_snr",
    "Point",
    "x",
    "y",
    "spreadingFactor",
];

/// Column positions within a survey table row
pub mod columns {
    pub const TIME: usize = 0;
    pub const COUNTER: usize = 1;
    pub const RSSI: usize = 2;
    pub const RSSI_MIN: usize = 3;
    pub const RSSI_MAX: usize = 4;
    pub const SNR: usize = 5;
    pub const SNR_MIN: usize = 6;
    pub const SNR_MAX: usize = 7;
    pub const GATEWAY_RSSI: usize = 8;
    pub const GATEWAY_SNR: usize = 9;
    pub const POINT: usize = 10;
    pub const X: usize = 11;
    pub const Y: usize = 12;
    pub const SPREADING_FACTOR: usize = 13;
}

/// Columns the exporter fills for every record; the rest stay empty
pub const EXPORTED_COLUMNS: &[usize] = &[
    columns::TIME,
    columns::COUNTER,
    columns::RSSI,
    columns::SNR,
    columns::GATEWAY_RSSI,
    columns::GATEWAY_SNR,
    columns::X,
    columns::Y,
    columns::SPREADING_FACTOR,
];

// =============================================================================
// Defaults
// =============================================================================

/// Default field delimiter for both directions
pub const DEFAULT_DELIMITER: u8 = b';';

/// Default export destination, relative to the working directory
pub const DEFAULT_EXPORT_PATH: &str = "survey.csv";

/// Default import destination, relative to the working directory
pub const DEFAULT_IMPORT_PATH: &str = "../data/Sample.json";

/// Default thresholds destination, relative to the working directory
pub const DEFAULT_THRESHOLDS_PATH: &str = "thresholds.json";

/// Timezone used to render measurement times (Swiss French convention)
pub const DEFAULT_TIMEZONE: &str = "Europe/Zurich";

/// Time-of-day format for exported measurement times
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Text written in place of a timestamp that cannot be interpreted
pub const INVALID_TIME_MARKER: &str = "Invalid Date";

/// Default survey title for command metadata
pub const DEFAULT_SURVEY_TITLE: &str = "LoRaWAN Survey";

/// Default corner locations for command metadata
pub const DEFAULT_LOCATIONS: [i64; 4] = [0, 0, 0, 0];

// =============================================================================
// Imported Document Placeholders
// =============================================================================

/// Title written into every imported survey document
pub const IMPORTED_TITLE: &str = "Sample Survey";

/// Floor plan path written into every imported survey document
pub const IMPORTED_IMAGE_PATH: &str = "images/Sample Plan.png";

// =============================================================================
// Thresholds
// =============================================================================

/// Metric keys reported by the thresholds command, in output order
pub const THRESHOLD_METRICS: &[&str] = &["sensor_rssi", "sensor_snr", "gateway_rssi", "gateway_snr"];
