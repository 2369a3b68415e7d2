//! Delimited survey table reading
//!
//! The first line of the input is a header and is discarded without looking
//! at it; columns are taken by position in the fixed survey layout.

use encoding_rs::mem::decode_latin1;
use std::borrow::Cow;
use tracing::debug;

use crate::app::models::TabularRecord;
use crate::app::services::coercion::parse_float;
use crate::constants::{COLUMN_COUNT, columns};
use crate::{Error, Result};

/// Decode ISO-8859-1 input byte for byte
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    decode_latin1(bytes)
}

/// Parse delimited survey table text into records
///
/// Empty lines are skipped. A row with a field count other than the survey
/// layout's is a parse error; `file` names the input in errors.
pub fn read_rows(text: &str, delimiter: u8, file: &str) -> Result<Vec<TabularRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| Error::csv_parsing(file, "Malformed delimited text", Some(e)))?;

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if line <= 1 {
            debug!("Discarded header line of {}", file);
            continue;
        }

        if row.len() != COLUMN_COUNT {
            return Err(Error::csv_parsing(
                file,
                format!(
                    "Line {}: expected {} fields, found {}",
                    line,
                    COLUMN_COUNT,
                    row.len()
                ),
                None,
            ));
        }

        records.push(to_record(&row));
    }

    Ok(records)
}

fn to_record(row: &csv::StringRecord) -> TabularRecord {
    let cell = |column: usize| row.get(column).filter(|cell| !cell.is_empty());
    let text = |column: usize| cell(column).map(str::to_string);
    let number = |column: usize| cell(column).map(parse_float);

    TabularRecord {
        time: text(columns::TIME),
        counter: text(columns::COUNTER),
        rssi: number(columns::RSSI),
        rssi_min: number(columns::RSSI_MIN),
        rssi_max: number(columns::RSSI_MAX),
        snr: number(columns::SNR),
        snr_min: number(columns::SNR_MIN),
        snr_max: number(columns::SNR_MAX),
        gateway_rssi: number(columns::GATEWAY_RSSI),
        gateway_snr: number(columns::GATEWAY_SNR),
        point: text(columns::POINT),
        x: number(columns::X),
        y: number(columns::Y),
        spreading_factor: text(columns::SPREADING_FACTOR),
    }
}
