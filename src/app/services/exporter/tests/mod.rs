//! Test utilities for the survey exporter
//!
//! Shared builders for collector measurements and temporary input files.

use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::app::models::RawMeasurement;

// Test modules
mod exporter_tests;
mod mapping_tests;

/// Measurement with every field the survey table uses
pub fn create_complete_measurement() -> Value {
    json!({
        "time": 1700000000000u64,
        "counter": 1,
        "result": {"rssi": -90, "snr": 5.5, "spreadingFactor": 7},
        "gateway": {"rssi": -80, "snr": 10}
    })
}

/// Measurement without device radio metrics
pub fn create_irrelevant_measurement() -> Value {
    json!({
        "time": 1700000001000u64,
        "counter": 2,
        "result": {"spreadingFactor": 7},
        "gateway": {"rssi": -80, "snr": 10}
    })
}

/// Decode a JSON literal into a measurement
pub fn measurement(value: Value) -> RawMeasurement {
    serde_json::from_value(value).unwrap()
}

/// Helper to create a temporary file with content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
