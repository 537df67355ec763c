//! Dataset registry: the fixed table of feeds this tool knows how to wrangle
//!
//! Each [`DatasetDefinition`] bundles a source location, the ordered output
//! columns, a line pattern with one named capture group per column, and the
//! dataset's own sentinel rules. Definitions are built once at startup by
//! [`builtin_datasets`] and handed to the pipeline explicitly.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// NOAA Mauna Loa monthly mean CO2
pub const CO2_URL: &str = "https://gml.noaa.gov/webdata/ccgg/trends/co2/co2_mm_mlo.txt";

/// NASA GISS global surface temperature anomaly (base 1951-1980)
pub const GLOBAL_TEMPS_URL: &str = "https://climate.nasa.gov/system/internal_resources/details/original/647_Global_Temperature_Data_File.txt";

// sample:
// 1964   4    1964.292      -99.99      321.77      319.48     -1
// 1964   5    1964.375      322.25      322.25      319.42     -1
const CO2_PATTERN: &str = concat!(
    r"^(?P<year>\d{4})\s+",
    r"(?P<month>\d{1,2})\s+",
    r"(?P<decimal_date>\d{4}\.\d{3})\s+",
    r"(?P<average>-?\d+\.\d+)\s+",
    r"(?P<interpolated>\d+\.\d+)\s+",
    r"(?P<trend>\d+\.\d+)\s+",
    r"(?P<days>-?\d+)\s*$",
);

// sample:
// 1976    -0.11   0.03
// 1977    0.17    0.07
const GLOBAL_TEMPS_PATTERN: &str = concat!(
    r"^(?P<year>\d{4})\s+",
    r"(?P<annual_mean>-?\d+\.?\d*)\s+",
    r"(?P<lowess>-?\d+\.?\d*)\s*$",
);

/// A literal value that the upstream source uses to mean "no measurement"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentinelRule {
    /// Column the rule applies to
    pub field: String,
    /// Exact captured text that means "missing"
    pub literal: String,
}

impl SentinelRule {
    /// Create a rule replacing `literal` in `field` with the missing marker
    pub fn new(field: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            literal: literal.into(),
        }
    }

    /// Whether `value` captured for this rule's field is the sentinel
    pub fn matches(&self, value: &str) -> bool {
        value == self.literal
    }
}

/// Immutable description of one remote feed
#[derive(Clone, Debug)]
pub struct DatasetDefinition {
    name: String,
    source_url: Url,
    field_names: Vec<String>,
    pattern: Regex,
    sentinels: Vec<SentinelRule>,
}

impl DatasetDefinition {
    /// Create and validate a dataset definition
    ///
    /// # Errors
    /// - [`Error::InvalidUrl`] if `source_url` does not parse
    /// - [`Error::Pattern`] if `pattern` does not compile
    /// - [`Error::Config`] if the pattern's named groups differ from
    ///   `field_names`, a field is declared twice, a sentinel names an
    ///   undeclared field, or the URL has no final path segment
    pub fn new(
        name: impl Into<String>,
        source_url: &str,
        field_names: &[&str],
        pattern: &str,
        sentinels: Vec<SentinelRule>,
    ) -> Result<Self> {
        let name = name.into();
        let source_url = parse_source_url(source_url)?;
        let pattern = Regex::new(pattern)?;
        let field_names: Vec<String> = field_names.iter().map(|f| f.to_string()).collect();

        let mut declared = HashSet::new();
        for field in &field_names {
            if !declared.insert(field.as_str()) {
                return Err(Error::config(format!(
                    "dataset '{}' declares field '{}' twice",
                    name, field
                )));
            }
        }

        let groups: HashSet<&str> = pattern.capture_names().flatten().collect();
        if groups != declared {
            let mut missing: Vec<&str> = declared.difference(&groups).copied().collect();
            let mut extra: Vec<&str> = groups.difference(&declared).copied().collect();
            missing.sort_unstable();
            extra.sort_unstable();
            return Err(Error::config(format!(
                "dataset '{}' pattern groups do not match fields (no group for {:?}, undeclared groups {:?})",
                name, missing, extra
            )));
        }

        if let Some(rule) = sentinels
            .iter()
            .find(|rule| !declared.contains(rule.field.as_str()))
        {
            return Err(Error::config(format!(
                "dataset '{}' has a sentinel rule for undeclared field '{}'",
                name, rule.field
            )));
        }

        raw_file_name_of(&source_url)?;

        Ok(Self {
            name,
            source_url,
            field_names,
            pattern,
            sentinels,
        })
    }

    /// Same definition, fetched from a different location
    ///
    /// The raw file name follows the new location's final path segment.
    pub fn with_source_url(&self, source_url: &str) -> Result<Self> {
        let source_url = parse_source_url(source_url)?;
        raw_file_name_of(&source_url)?;
        Ok(Self {
            source_url,
            ..self.clone()
        })
    }

    /// Dataset identifier, also the stem of the wrangled CSV
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remote location of the raw text
    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    /// Output columns in order
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Compiled line pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Sentinel rules for this dataset (may be empty)
    pub fn sentinels(&self) -> &[SentinelRule] {
        &self.sentinels
    }

    /// File name for the raw copy: the source URL's final path segment
    pub fn raw_file_name(&self) -> &str {
        // validated non-empty in the constructors
        self.source_url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
    }
}

fn parse_source_url(source_url: &str) -> Result<Url> {
    Url::parse(source_url).map_err(|source| Error::InvalidUrl {
        url: source_url.to_string(),
        source,
    })
}

fn raw_file_name_of(url: &Url) -> Result<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| {
            Error::config(format!(
                "source location {} has no file name to store the raw copy under",
                url
            ))
        })
}

/// Monthly CO2 at Mauna Loa; `-99.99` averages and `-1` day counts mean "no data"
pub fn co2() -> Result<DatasetDefinition> {
    DatasetDefinition::new(
        "co2",
        CO2_URL,
        &[
            "year",
            "month",
            "decimal_date",
            "average",
            "interpolated",
            "trend",
            "days",
        ],
        CO2_PATTERN,
        vec![
            SentinelRule::new("average", "-99.99"),
            SentinelRule::new("days", "-1"),
        ],
    )
}

/// Annual global temperature anomaly with its LOWESS smoothing
pub fn global_temps() -> Result<DatasetDefinition> {
    DatasetDefinition::new(
        "global_temps",
        GLOBAL_TEMPS_URL,
        &["year", "annual_mean", "lowess"],
        GLOBAL_TEMPS_PATTERN,
        Vec::new(),
    )
}

/// Every registered dataset, in processing order
pub fn builtin_datasets() -> Result<Vec<DatasetDefinition>> {
    Ok(vec![co2()?, global_temps()?])
}
