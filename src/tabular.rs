//! CSV output for wrangled records
//!
//! Missing values are written as empty cells, never as a placeholder string,
//! and read back as missing by [`read_csv`].

use crate::error::{Error, Result};
use crate::types::Record;
use std::path::Path;
use tracing::debug;

/// Write `records` to `destination` as CSV with a `field_names` header
///
/// Columns follow `field_names` order; a field absent from a record is
/// written as an empty cell. Parent directories are created and any existing
/// file is replaced.
///
/// # Errors
/// Returns [`Error::Io`] if the directory or file cannot be created and
/// [`Error::Csv`] if writing a row fails.
pub fn write_csv(records: &[Record], field_names: &[String], destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let file = std::fs::File::create(destination).map_err(|e| Error::io(destination, e))?;
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(file);

    writer.write_record(field_names)?;
    for record in records {
        writer.write_record(
            field_names
                .iter()
                .map(|field| record.get(field).unwrap_or_default()),
        )?;
    }

    writer.flush().map_err(|e| Error::io(destination, e))?;
    debug!(
        path = %destination.display(),
        rows = records.len(),
        "wrote CSV"
    );
    Ok(())
}

/// Read a CSV produced by [`write_csv`] back into records
///
/// The header row supplies the field names. Empty cells become missing values.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be opened and [`Error::Csv`] on
/// malformed rows.
pub fn read_csv(source: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(source).map_err(|e| Error::io(source, e))?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| {
                let value = (!cell.is_empty()).then(|| cell.to_string());
                (name.clone(), value)
            })
            .collect();
        records.push(Record::new(fields));
    }

    Ok(records)
}
