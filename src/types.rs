//! Core data types: wrangled records and per-dataset run reports

use std::path::PathBuf;

/// One wrangled line: field values in declared column order
///
/// A value of `None` is the explicit missing-value marker produced by a
/// sentinel rule. It is distinct from an empty string and serializes as an
/// empty CSV cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    /// Build a record from `(field, value)` pairs, keeping their order
    pub fn new(fields: Vec<(String, Option<String>)>) -> Self {
        Self { fields }
    }

    /// Value of `field`
    ///
    /// Returns `None` both when the field is missing and when it does not
    /// exist; use [`Record::is_missing`] to tell them apart.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether `field` exists and carries the missing-value marker
    pub fn is_missing(&self, field: &str) -> bool {
        self.fields
            .iter()
            .any(|(name, value)| name == field && value.is_none())
    }

    /// Field names in column order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

/// Outcome of processing one dataset
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetReport {
    /// Dataset identifier (e.g., "co2")
    pub name: String,
    /// Where the raw text came from
    pub source_url: String,
    /// Where the raw text was saved
    pub raw_path: PathBuf,
    /// Where the CSV was written
    pub csv_path: PathBuf,
    /// Number of records written (one per matched line)
    pub record_count: usize,
}
