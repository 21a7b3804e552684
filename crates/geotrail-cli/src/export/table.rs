use std::path::Path;

use geotrail_core::GeoRecord;
use serde::Serialize;

use super::ExportError;

const HEADER: [&str; 6] = [
    "latitude",
    "longitude",
    "type",
    "startTime",
    "endTime",
    "entryID",
];

#[derive(Debug, Serialize)]
struct TableRow<'a> {
    latitude: f64,
    longitude: f64,
    kind: &'a str,
    start_time: &'a str,
    end_time: &'a str,
    entry_id: usize,
}

impl<'a> From<&'a GeoRecord> for TableRow<'a> {
    fn from(record: &'a GeoRecord) -> Self {
        TableRow {
            latitude: record.latitude,
            longitude: record.longitude,
            kind: record.kind.as_str(),
            start_time: &record.start_time,
            end_time: &record.end_time,
            entry_id: record.source_index,
        }
    }
}

/// Writes one row per record to `path`, header first. Returns the row count.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub(crate) fn write_table(path: &Path, records: &[GeoRecord]) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::io(path, e))?;
    write_table_to(file, records)
}

fn write_table_to<W: std::io::Write>(
    writer: W,
    records: &[GeoRecord],
) -> Result<usize, ExportError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    // Written explicitly so an empty export still gets a header line.
    out.write_record(HEADER)?;
    for record in records {
        out.serialize(TableRow::from(record))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(records.len())
}
