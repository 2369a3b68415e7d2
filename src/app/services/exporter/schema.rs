//! Export schema consistency checking
//!
//! The survey table layout is declared up front rather than inferred from
//! the first record. Each row the exporter builds must fill exactly the
//! declared export columns; a row that does not is rejected before anything
//! is written.
//!
//! The source measurements must also agree with each other: every relevant
//! measurement's `result` carries the same keys as the first relevant one.

use std::collections::BTreeSet;

use crate::app::models::{MeasurementResult, TabularRecord};
use crate::constants::{COLUMN_NAMES, EXPORTED_COLUMNS};
use crate::{Error, Result};

/// Check a built row against the declared export columns
///
/// `record_index` is the position of the source measurement in the input
/// and is reported in the error.
pub fn check_record_schema(record_index: usize, record: &TabularRecord) -> Result<()> {
    let populated = record.populated_columns();

    let missing: Vec<String> = EXPORTED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !populated.contains(column))
        .map(|column| COLUMN_NAMES[column].to_string())
        .collect();

    let unexpected: Vec<String> = populated
        .iter()
        .copied()
        .filter(|column| !EXPORTED_COLUMNS.contains(column))
        .map(|column| COLUMN_NAMES[column].to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(Error::schema_mismatch(record_index, missing, unexpected))
    }
}

/// Check a measurement result's keys against the reference key set
///
/// `expected` is the key set of the first relevant measurement. Missing and
/// unexpected keys are reported in sorted order.
pub fn check_result_keys(
    record_index: usize,
    expected: &BTreeSet<String>,
    result: &MeasurementResult,
) -> Result<()> {
    let actual = result.key_names();

    if &actual == expected {
        return Ok(());
    }

    let missing = expected.difference(&actual).cloned().collect();
    let unexpected = actual.difference(expected).cloned().collect();
    Err(Error::schema_mismatch(record_index, missing, unexpected))
}
