//! Measurement to survey-table mapping
//!
//! This module decides which collector measurements enter the survey table
//! and how their nested fields flatten into table cells.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::app::models::{RawMeasurement, TabularRecord};
use crate::app::services::coercion::{Presence, coerce_float_opt, coerce_int_opt, scalar_text};
use crate::constants::{INVALID_TIME_MARKER, TIME_FORMAT};

/// Whether a measurement belongs in the survey table
///
/// Only measurements carrying both a device RSSI and a device SNR qualify.
pub fn is_survey_relevant(measurement: &RawMeasurement) -> bool {
    measurement.result.rssi.is_present() && measurement.result.snr.is_present()
}

/// Flatten a measurement into a survey table row
///
/// Coordinates are placeholders (`0`), assigned later when points are placed
/// on the floor plan. Min/max variants and the point label stay empty.
pub fn to_tabular_record(measurement: &RawMeasurement, timezone: &Tz) -> TabularRecord {
    let result = &measurement.result;
    let gateway = measurement.gateway.as_ref();

    TabularRecord {
        time: measurement
            .time
            .as_ref()
            .map(|time| format_time(time, timezone)),
        counter: measurement.counter.as_ref().and_then(scalar_text),
        rssi: Some(coerce_int_opt(result.rssi.as_ref())),
        snr: Some(coerce_float_opt(result.snr.as_ref())),
        gateway_rssi: gateway.map(|g| coerce_int_opt(g.rssi.as_ref())),
        gateway_snr: gateway.map(|g| coerce_float_opt(g.snr.as_ref())),
        x: Some(0.0),
        y: Some(0.0),
        spreading_factor: result.spreading_factor.as_ref().and_then(scalar_text),
        ..Default::default()
    }
}

/// Render a measurement timestamp as a time of day in `timezone`
pub fn format_time(value: &Value, timezone: &Tz) -> String {
    parse_timestamp(value, timezone)
        .map(|instant| instant.with_timezone(timezone).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_TIME_MARKER.to_string())
}

/// Interpret a timestamp given as epoch milliseconds or as date-time text
///
/// Text without an offset is taken as local time in `timezone`.
fn parse_timestamp(value: &Value, timezone: &Tz) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|millis| millis.is_finite())
                    .map(|millis| millis.trunc() as i64)
            })
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(text) => {
            let text = text.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Some(dt.with_timezone(&Utc));
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .and_then(|naive| timezone.from_local_datetime(&naive).earliest())
                .map(|local| local.with_timezone(&Utc))
        }
        _ => None,
    }
}
