//! Tests for measurement filtering and field derivation

use chrono_tz::Europe::Zurich;
use chrono_tz::UTC;
use serde_json::json;

use super::super::mapping::{format_time, is_survey_relevant, to_tabular_record};
use super::{create_complete_measurement, create_irrelevant_measurement, measurement};
use crate::constants::INVALID_TIME_MARKER;

#[test]
fn test_relevance_requires_rssi_and_snr() {
    assert!(is_survey_relevant(&measurement(create_complete_measurement())));
    assert!(!is_survey_relevant(&measurement(create_irrelevant_measurement())));

    let rssi_only = measurement(json!({"result": {"rssi": -90}}));
    assert!(!is_survey_relevant(&rssi_only));

    let zero_snr = measurement(json!({"result": {"rssi": -90, "snr": 0}}));
    assert!(!is_survey_relevant(&zero_snr));

    let text_zero_snr = measurement(json!({"result": {"rssi": -90, "snr": "0"}}));
    assert!(is_survey_relevant(&text_zero_snr));
}

#[test]
fn test_record_fields() {
    let record = to_tabular_record(&measurement(create_complete_measurement()), &Zurich);

    assert_eq!(record.time.as_deref(), Some("23:13:20"));
    assert_eq!(record.counter.as_deref(), Some("1"));
    assert_eq!(record.rssi, Some(-90.0));
    assert_eq!(record.snr, Some(5.5));
    assert_eq!(record.gateway_rssi, Some(-80.0));
    assert_eq!(record.gateway_snr, Some(10.0));
    assert_eq!(record.spreading_factor.as_deref(), Some("7"));
}

#[test]
fn test_coordinates_are_zero_placeholders() {
    let record = to_tabular_record(&measurement(create_complete_measurement()), &Zurich);

    assert_eq!(record.x, Some(0.0));
    assert_eq!(record.y, Some(0.0));
    assert!(record.point.is_none());
    assert!(record.rssi_min.is_none());
    assert!(record.snr_max.is_none());
}

#[test]
fn test_text_metrics_are_coerced() {
    let record = to_tabular_record(
        &measurement(json!({
            "time": 0,
            "counter": "c-9",
            "result": {"rssi": "-87.9", "snr": "7.25dB"},
            "gateway": {"rssi": "n/a", "snr": -3}
        })),
        &Zurich,
    );

    assert_eq!(record.rssi, Some(-87.0));
    assert_eq!(record.snr, Some(7.25));
    assert!(record.gateway_rssi.is_some_and(f64::is_nan));
    assert_eq!(record.gateway_snr, Some(-3.0));
    assert_eq!(record.counter.as_deref(), Some("c-9"));
}

#[test]
fn test_missing_gateway_leaves_cells_empty() {
    let record = to_tabular_record(
        &measurement(json!({"time": 0, "counter": 1, "result": {"rssi": -90, "snr": 1}})),
        &Zurich,
    );

    assert!(record.gateway_rssi.is_none());
    assert!(record.gateway_snr.is_none());
    assert!(record.spreading_factor.is_none());
}

#[test]
fn test_time_formatting() {
    assert_eq!(format_time(&json!(1700000000000u64), &Zurich), "23:13:20");
    assert_eq!(format_time(&json!(1700000000000u64), &UTC), "22:13:20");
    // Summer time
    assert_eq!(format_time(&json!("2024-07-01T10:00:00Z"), &Zurich), "12:00:00");
    assert_eq!(
        format_time(&json!("2024-07-01T10:00:00+02:00"), &Zurich),
        "10:00:00"
    );
    assert_eq!(format_time(&json!("2024-01-15 08:30:05"), &Zurich), "08:30:05");
}

#[test]
fn test_unparseable_time() {
    assert_eq!(format_time(&json!("yesterday"), &Zurich), INVALID_TIME_MARKER);
    assert_eq!(format_time(&json!(true), &Zurich), INVALID_TIME_MARKER);
    assert_eq!(format_time(&json!(null), &Zurich), INVALID_TIME_MARKER);
}
