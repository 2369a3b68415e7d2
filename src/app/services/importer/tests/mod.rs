//! Test utilities for the survey importer

use std::io::Write;
use tempfile::NamedTempFile;


pub const HEADER: &str = "Time;Compteur;rssi;rssi_min;rssi_max;snr;snr_min;snr_max;gateway_rssi;gateway_snr;Point;x;y;spreadingFactor";

/// Helper to create a survey table from data lines
pub fn create_test_table(rows: &[&str]) -> String {
    let mut table = String::from(HEADER);
    for row in rows {
        table.push('\n');
        table.push_str(row);
    }
    table.push('\n');
    table
}

/// Helper to create a temporary file with raw bytes
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
