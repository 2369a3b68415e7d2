//! Data models for survey conversion
//!
//! This module contains the three shapes survey data takes on its way
//! through the converter: the nested measurements emitted by the collection
//! tool, the flat 14-column survey table, and the survey document consumed by
//! the heat-map tooling.

use crate::app::services::coercion::format_number;
use crate::constants::{COLUMN_COUNT, columns};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

// =============================================================================
// Collector Measurements
// =============================================================================

/// One measurement as emitted by the collection tool
///
/// Scalars are kept as raw JSON values: the collector is loose about types
/// (RSSI may arrive as `-90` or `"-90"`) and coercion happens during export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawMeasurement {
    /// Timestamp, epoch milliseconds or an RFC 3339 string
    #[serde(default)]
    pub time: Option<Value>,

    /// Measurement counter (any scalar)
    #[serde(default)]
    pub counter: Option<Value>,

    /// Device-side radio metrics
    #[serde(default)]
    pub result: MeasurementResult,

    /// Gateway-side radio metrics
    #[serde(default)]
    pub gateway: Option<GatewayReading>,
}

/// Device-side radio metrics of a measurement
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MeasurementResult {
    #[serde(default)]
    pub rssi: Option<Value>,

    #[serde(default)]
    pub snr: Option<Value>,

    #[serde(default, rename = "spreadingFactor")]
    pub spreading_factor: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi_min: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi_max: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr_min: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr_max: Option<Value>,

    /// Keys the converter does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MeasurementResult {
    /// Names of the keys this result carries, sorted
    ///
    /// A key holding `null` counts as absent.
    pub fn key_names(&self) -> BTreeSet<String> {
        let named = [
            ("rssi", &self.rssi),
            ("snr", &self.snr),
            ("spreadingFactor", &self.spreading_factor),
            ("rssi_min", &self.rssi_min),
            ("rssi_max", &self.rssi_max),
            ("snr_min", &self.snr_min),
            ("snr_max", &self.snr_max),
        ];

        named
            .into_iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| name.to_string())
            .chain(self.extra.keys().cloned())
            .collect()
    }
}

/// Gateway-side radio metrics of a measurement
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GatewayReading {
    #[serde(default)]
    pub rssi: Option<Value>,

    #[serde(default)]
    pub snr: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Survey Table
// =============================================================================

/// One row of the flat survey table
///
/// `None` is an empty cell. A numeric cell holding NaN is the
/// not-a-number marker produced by permissive coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularRecord {
    pub time: Option<String>,
    pub counter: Option<String>,
    pub rssi: Option<f64>,
    pub rssi_min: Option<f64>,
    pub rssi_max: Option<f64>,
    pub snr: Option<f64>,
    pub snr_min: Option<f64>,
    pub snr_max: Option<f64>,
    pub gateway_rssi: Option<f64>,
    pub gateway_snr: Option<f64>,
    pub point: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub spreading_factor: Option<String>,
}

impl TabularRecord {
    /// Render the record as table cells in column order
    pub fn to_cells(&self) -> [String; COLUMN_COUNT] {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let number = |value: &Option<f64>| value.map(format_number).unwrap_or_default();

        [
            text(&self.time),
            text(&self.counter),
            number(&self.rssi),
            number(&self.rssi_min),
            number(&self.rssi_max),
            number(&self.snr),
            number(&self.snr_min),
            number(&self.snr_max),
            number(&self.gateway_rssi),
            number(&self.gateway_snr),
            text(&self.point),
            number(&self.x),
            number(&self.y),
            text(&self.spreading_factor),
        ]
    }

    /// Column positions of the non-empty cells, in column order
    pub fn populated_columns(&self) -> Vec<usize> {
        let presence = [
            (columns::TIME, self.time.is_some()),
            (columns::COUNTER, self.counter.is_some()),
            (columns::RSSI, self.rssi.is_some()),
            (columns::RSSI_MIN, self.rssi_min.is_some()),
            (columns::RSSI_MAX, self.rssi_max.is_some()),
            (columns::SNR, self.snr.is_some()),
            (columns::SNR_MIN, self.snr_min.is_some()),
            (columns::SNR_MAX, self.snr_max.is_some()),
            (columns::GATEWAY_RSSI, self.gateway_rssi.is_some()),
            (columns::GATEWAY_SNR, self.gateway_snr.is_some()),
            (columns::POINT, self.point.is_some()),
            (columns::X, self.x.is_some()),
            (columns::Y, self.y.is_some()),
            (columns::SPREADING_FACTOR, self.spreading_factor.is_some()),
        ];

        presence
            .into_iter()
            .filter_map(|(column, present)| present.then_some(column))
            .collect()
    }
}

// =============================================================================
// Survey Document
// =============================================================================

/// Survey document consumed by the heat-map tooling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SurveyDocument {
    /// Survey title
    pub title: String,

    /// Path of the floor plan the points are placed on
    pub img_path: String,

    /// Survey points in input order
    pub survey_points: Vec<SurveyPoint>,
}

impl SurveyDocument {
    /// Create a document from its parts
    pub fn new(
        title: impl Into<String>,
        img_path: impl Into<String>,
        survey_points: Vec<SurveyPoint>,
    ) -> Self {
        Self {
            title: title.into(),
            img_path: img_path.into(),
            survey_points,
        }
    }
}

/// A single surveyed location
///
/// NaN readings serialize as JSON `null`; `null` and missing readings
/// deserialize back to NaN.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SurveyPoint {
    /// Measurement counter; empty when the document carries none
    #[serde(default, deserialize_with = "counter_text")]
    pub counter: String,

    pub result: PointResult,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub x: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub y: f64,
}

/// Radio readings attached to a survey point
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PointResult {
    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub rssi: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub snr: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub rssi_min: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub snr_min: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub rssi_max: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub snr_max: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub gateway_rssi: f64,

    #[serde(default = "not_a_number", deserialize_with = "nullable_f64")]
    pub gateway_snr: f64,
}

fn not_a_number() -> f64 {
    f64::NAN
}

fn nullable_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// Documents written by other tools may carry numeric counters
fn counter_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_key_names() {
        let result: MeasurementResult = serde_json::from_value(json!({
            "rssi": -90,
            "snr": 5.5,
            "rssi_min": -95,
            "bandwidth": 125,
            "snr_max": null
        }))
        .unwrap();

        let names: Vec<String> = result.key_names().into_iter().collect();
        assert_eq!(names, vec!["bandwidth", "rssi", "rssi_min", "snr"]);
    }

    #[test]
    fn test_raw_measurement_deserialization() {
        let measurement: RawMeasurement = serde_json::from_value(json!({
            "time": 1700000000000u64,
            "counter": 12,
            "result": {"rssi": "-90", "snr": 5.5, "spreadingFactor": 7, "bandwidth": 125},
            "gateway": {"rssi": -80, "snr": "10", "id": "gw-1"}
        }))
        .unwrap();

        assert_eq!(measurement.counter, Some(json!(12)));
        assert_eq!(measurement.result.rssi, Some(json!("-90")));
        assert_eq!(measurement.result.spreading_factor, Some(json!(7)));
        assert_eq!(measurement.result.extra.get("bandwidth"), Some(&json!(125)));
        assert!(measurement.result.rssi_min.is_none());

        let gateway = measurement.gateway.unwrap();
        assert_eq!(gateway.snr, Some(json!("10")));
        assert_eq!(gateway.extra.get("id"), Some(&json!("gw-1")));
    }

    #[test]
    fn test_raw_measurement_tolerates_missing_sections() {
        let measurement: RawMeasurement = serde_json::from_value(json!({"counter": 1})).unwrap();
        assert!(measurement.result.rssi.is_none());
        assert!(measurement.gateway.is_none());
        assert!(measurement.time.is_none());
    }

    #[test]
    fn test_tabular_record_cells() {
        let record = TabularRecord {
            time: Some("12:00:00".to_string()),
            counter: Some("3".to_string()),
            rssi: Some(-90.0),
            snr: Some(5.5),
            gateway_rssi: Some(f64::NAN),
            x: Some(0.0),
            ..Default::default()
        };

        let cells = record.to_cells();
        assert_eq!(cells[columns::TIME], "12:00:00");
        assert_eq!(cells[columns::RSSI], "-90");
        assert_eq!(cells[columns::SNR], "5.5");
        assert_eq!(cells[columns::GATEWAY_RSSI], "NaN");
        assert_eq!(cells[columns::RSSI_MIN], "");
        assert_eq!(cells[columns::X], "0");
        assert_eq!(cells[columns::Y], "");

        assert_eq!(
            record.populated_columns(),
            vec![
                columns::TIME,
                columns::COUNTER,
                columns::RSSI,
                columns::SNR,
                columns::GATEWAY_RSSI,
                columns::X
            ]
        );
    }

    #[test]
    fn test_survey_point_nan_serializes_as_null() {
        let point = SurveyPoint {
            counter: "1".to_string(),
            result: PointResult {
                rssi: -90.0,
                snr: 5.5,
                rssi_min: f64::NAN,
                snr_min: f64::NAN,
                rssi_max: f64::NAN,
                snr_max: f64::NAN,
                gateway_rssi: -80.0,
                gateway_snr: 10.0,
            },
            x: 0.0,
            y: 0.0,
        };

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["result"]["rssi"], json!(-90.0));
        assert_eq!(value["result"]["rssi_min"], Value::Null);
        assert_eq!(value["counter"], json!("1"));
    }

    #[test]
    fn test_survey_point_null_deserializes_as_nan() {
        let point: SurveyPoint = serde_json::from_value(json!({
            "counter": 4,
            "result": {"rssi": -70, "snr": null, "gateway_rssi": -60.5},
            "x": 120,
            "y": null,
            "label": "A1"
        }))
        .unwrap();

        assert_eq!(point.counter, "4");
        assert_eq!(point.result.rssi, -70.0);
        assert!(point.result.snr.is_nan());
        assert!(point.result.gateway_snr.is_nan());
        assert_eq!(point.result.gateway_rssi, -60.5);
        assert_eq!(point.x, 120.0);
        assert!(point.y.is_nan());
    }
}
