//! Delimited text rendering for the survey table

use crate::app::models::TabularRecord;
use crate::constants::COLUMN_NAMES;
use crate::{Error, Result};

/// Render the header row and `records` as delimited text
///
/// Fields containing the delimiter, quotes or line breaks are quoted; lines
/// end with `\n`.
pub fn render_table(records: &[TabularRecord], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMN_NAMES)?;
    for record in records {
        writer.write_record(record.to_cells())?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Failed to flush delimited output", e.into_error()))
}
