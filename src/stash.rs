//! On-disk layout of a stash directory
//!
//! ```text
//! <root>/
//!   raw/<final segment of source URL>
//!   wrangled/<dataset name>.csv
//! ```

use crate::registry::DatasetDefinition;
use std::path::PathBuf;

/// Subdirectory for verbatim source text
pub const RAW_DIR: &str = "raw";

/// Subdirectory for CSV output
pub const WRANGLED_DIR: &str = "wrangled";

/// Resolves where each dataset's files live under a stash root
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StashLayout {
    root: PathBuf,
}

impl StashLayout {
    /// Layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the raw copy of `dataset` is saved
    pub fn raw_path(&self, dataset: &DatasetDefinition) -> PathBuf {
        self.root.join(RAW_DIR).join(dataset.raw_file_name())
    }

    /// Where the CSV for `dataset` is written
    pub fn wrangled_path(&self, dataset: &DatasetDefinition) -> PathBuf {
        self.root
            .join(WRANGLED_DIR)
            .join(format!("{}.csv", dataset.name()))
    }
}
