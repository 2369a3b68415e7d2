//! Survey table row to survey point mapping

use crate::app::models::{PointResult, SurveyDocument, SurveyPoint, TabularRecord};
use crate::app::services::coercion::Presence;
use crate::constants::{IMPORTED_IMAGE_PATH, IMPORTED_TITLE};

/// Whether a row becomes a survey point
///
/// Rows without a counter are dropped.
pub fn include_row(record: &TabularRecord) -> bool {
    record.counter.is_present()
}

/// Build a survey point from a table row
///
/// Time, point label and spreading factor are not carried over.
pub fn to_survey_point(record: &TabularRecord) -> SurveyPoint {
    let number = |value: Option<f64>| value.unwrap_or(f64::NAN);

    SurveyPoint {
        counter: record.counter.clone().unwrap_or_default(),
        result: PointResult {
            rssi: number(record.rssi),
            snr: number(record.snr),
            rssi_min: number(record.rssi_min),
            snr_min: number(record.snr_min),
            rssi_max: number(record.rssi_max),
            snr_max: number(record.snr_max),
            gateway_rssi: number(record.gateway_rssi),
            gateway_snr: number(record.gateway_snr),
        },
        x: number(record.x),
        y: number(record.y),
    }
}

/// Wrap survey points in a document with the placeholder title and image
pub fn build_document(survey_points: Vec<SurveyPoint>) -> SurveyDocument {
    SurveyDocument::new(IMPORTED_TITLE, IMPORTED_IMAGE_PATH, survey_points)
}
