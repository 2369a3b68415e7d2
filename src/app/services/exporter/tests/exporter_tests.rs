//! Tests for the exporter pipeline

use serde_json::json;
use tempfile::TempDir;

use super::super::Exporter;
use super::{create_complete_measurement, create_irrelevant_measurement, create_temp_file, measurement};
use crate::Error;
use crate::config::ExportConfig;

fn exporter_to(dir: &TempDir) -> Exporter {
    Exporter::new(ExportConfig::default().with_output_path(dir.path().join("survey.csv"))).unwrap()
}

#[test]
fn test_convert_filters_measurements() {
    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let measurements = vec![
        measurement(create_complete_measurement()),
        measurement(create_irrelevant_measurement()),
        measurement(create_complete_measurement()),
    ];

    let result = exporter.convert(&measurements).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.records_read, 3);
    assert_eq!(result.stats.records_written, 2);
    assert_eq!(result.stats.records_skipped, 1);
}

#[test]
fn test_convert_rejects_incomplete_record() {
    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let measurements = vec![
        measurement(create_complete_measurement()),
        measurement(json!({"time": 0, "counter": 2, "result": {"rssi": -90, "snr": 3}})),
    ];

    match exporter.convert(&measurements) {
        Err(Error::SchemaMismatch {
            record, missing, ..
        }) => {
            assert_eq!(record, 1);
            assert!(missing.contains(&"gateway_rssi".to_string()));
            assert!(missing.contains(&"spreadingFactor".to_string()));
        }
        other => panic!("Expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_convert_rejects_extra_result_key() {
    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let mut extended = create_complete_measurement();
    extended["result"]["rssi_min"] = json!(-95);
    let measurements = vec![
        measurement(create_complete_measurement()),
        measurement(create_irrelevant_measurement()),
        measurement(extended),
    ];

    match exporter.convert(&measurements) {
        Err(Error::SchemaMismatch {
            record,
            missing,
            unexpected,
        }) => {
            assert_eq!(record, 2);
            assert!(missing.is_empty());
            assert_eq!(unexpected, vec!["rssi_min".to_string()]);
        }
        other => panic!("Expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_convert_reference_keys_from_first_relevant() {
    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let mut extended = create_complete_measurement();
    extended["result"]["bandwidth"] = json!(125);
    let measurements = vec![
        measurement(create_irrelevant_measurement()),
        measurement(extended.clone()),
        measurement(extended),
    ];

    let result = exporter.convert(&measurements).unwrap();
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.records_skipped, 1);
}

#[test]
fn test_render_rows() {
    let exporter = Exporter::new(ExportConfig::default()).unwrap();
    let result = exporter
        .convert(&[measurement(create_complete_measurement())])
        .unwrap();

    let text = String::from_utf8(exporter.render(&result.records).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Time;Compteur;rssi;rssi_min;rssi_max;snr;snr_min;snr_max;gateway_rssi;gateway_snr;Point;x;y;spreadingFactor"
    );
    assert_eq!(lines[1], "23:13:20;1;-90;;;5.5;;;-80;10;;0;0;7");
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_render_custom_delimiter() {
    let exporter = Exporter::new(ExportConfig::default().with_delimiter(b',')).unwrap();
    let result = exporter
        .convert(&[measurement(create_complete_measurement())])
        .unwrap();

    let text = String::from_utf8(exporter.render(&result.records).unwrap()).unwrap();
    assert!(text.ends_with("23:13:20,1,-90,,,5.5,,,-80,10,,0,0,7\n"));
}

#[test]
fn test_invalid_timezone_rejected() {
    let result = Exporter::new(ExportConfig::default().with_timezone("Mars/Olympus"));
    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[tokio::test]
async fn test_export_file() {
    let input = create_temp_file(
        &json!([create_complete_measurement(), create_irrelevant_measurement()]).to_string(),
    );
    let dir = TempDir::new().unwrap();
    let exporter = exporter_to(&dir);

    let outcome = exporter.export_file(input.path()).await.unwrap();

    assert_eq!(outcome.stats.records_written, 1);
    assert_eq!(outcome.stats.records_skipped, 1);
    let written = std::fs::read_to_string(&outcome.output_path).unwrap();
    assert_eq!(written.len() as u64, outcome.bytes_written);
    assert_eq!(written.lines().count(), 2);
}

#[tokio::test]
async fn test_export_empty_array_writes_header_only() {
    let input = create_temp_file("[]");
    let dir = TempDir::new().unwrap();

    let outcome = exporter_to(&dir).export_file(input.path()).await.unwrap();

    let written = std::fs::read_to_string(&outcome.output_path).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.starts_with("Time;Compteur;"));
}

#[tokio::test]
async fn test_schema_mismatch_writes_nothing() {
    let input = create_temp_file(
        &json!([{"time": 0, "counter": 1, "result": {"rssi": -90, "snr": 3}}]).to_string(),
    );
    let dir = TempDir::new().unwrap();
    let exporter = exporter_to(&dir);

    let result = exporter.export_file(input.path()).await;

    assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    assert!(!dir.path().join("survey.csv").exists());
}

#[tokio::test]
async fn test_malformed_json() {
    let input = create_temp_file("{\"not\": \"an array\"}");
    let dir = TempDir::new().unwrap();

    let result = exporter_to(&dir).export_file(input.path()).await;
    assert!(matches!(result, Err(Error::Json { .. })));
}

#[tokio::test]
async fn test_missing_input() {
    let dir = TempDir::new().unwrap();

    let result = exporter_to(&dir)
        .export_file(&dir.path().join("absent.json"))
        .await;
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}
