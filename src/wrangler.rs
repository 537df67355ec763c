//! Turn raw feed text into records
//!
//! Every line is tried against the dataset's anchored pattern. A match
//! becomes one [`Record`], anything else (headers, comments, blank lines) is
//! skipped silently. Sentinel rules from the dataset definition then replace
//! "no data" literals with the missing-value marker.

use crate::registry::DatasetDefinition;
use crate::types::Record;
use tracing::{debug, warn};

/// Split `text` on `\n`, `\r\n` and lone `\r`
///
/// A trailing terminator does not produce an extra line.
///
/// ```
/// use climate_stash::wrangler::universal_lines;
///
/// let lines: Vec<&str> = universal_lines("a\r\nb\rc\n").collect();
/// assert_eq!(lines, ["a", "b", "c"]);
/// ```
pub fn universal_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let (line, remainder) = match rest.find(['\r', '\n']) {
            Some(end) => {
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..end], &rest[end + terminator..])
            }
            None => (rest, ""),
        };
        rest = remainder;
        Some(line)
    })
}

/// Match one line against the dataset pattern
///
/// Returns `None` when the line does not have the dataset's shape.
pub fn wrangle_line(line: &str, dataset: &DatasetDefinition) -> Option<Record> {
    let caps = dataset.pattern().captures(line)?;

    let fields = dataset
        .field_names()
        .iter()
        .map(|field| {
            let value = caps.name(field).map(|m| m.as_str()).filter(|value| {
                !dataset
                    .sentinels()
                    .iter()
                    .any(|rule| rule.field == *field && rule.matches(value))
            });
            (field.clone(), value.map(str::to_string))
        })
        .collect();

    Some(Record::new(fields))
}

/// Parse every matching line of `text` into a record, in source order
pub fn wrangle(text: &str, dataset: &DatasetDefinition) -> Vec<Record> {
    let mut skipped = 0usize;
    let records: Vec<Record> = universal_lines(text)
        .filter_map(|line| {
            let record = wrangle_line(line, dataset);
            if record.is_none() {
                skipped += 1;
            }
            record
        })
        .collect();

    debug!(
        dataset = dataset.name(),
        matched = records.len(),
        skipped,
        "wrangled lines"
    );

    if records.is_empty() && !text.trim().is_empty() {
        warn!(
            dataset = dataset.name(),
            "no line matched the dataset pattern; upstream format may have changed"
        );
    }

    records
}
