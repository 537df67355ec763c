//! # climate-stash
//!
//! Fetches two plaintext climate feeds, the NOAA Mauna Loa monthly CO2 series
//! and the NASA GISS global temperature anomaly, parses them with fixed line
//! patterns, and writes each as CSV next to a verbatim copy of the source.
//!
//! ## Quick Start
//!
//! ```no_run
//! use climate_stash::{Config, registry, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let datasets = registry::builtin_datasets()?;
//!     let reports = pipeline::run(&Config::default(), &datasets).await?;
//!
//!     for report in reports {
//!         println!("{}: {} records -> {}", report.name, report.record_count, report.csv_path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Wrangling without the network
//!
//! ```
//! use climate_stash::{registry, wrangler};
//!
//! let co2 = registry::co2().unwrap();
//! let records = wrangler::wrangle(
//!     "# header\n1964   4    1964.292      -99.99      321.77      319.48     -1\n",
//!     &co2,
//! );
//!
//! assert_eq!(records.len(), 1);
//! assert!(records[0].is_missing("average"));
//! assert_eq!(records[0].get("trend"), Some("319.48"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Raw text retrieval and persistence
pub mod fetcher;
/// Batch run over all datasets
pub mod pipeline;
/// Built-in dataset definitions
pub mod registry;
/// Stash directory layout
pub mod stash;
/// CSV output
pub mod tabular;
/// Scheme-specific retrieval
pub mod transport;
/// Core types
pub mod types;
/// Line matching and sentinel substitution
pub mod wrangler;

// Re-export commonly used types
pub use config::{Config, HttpConfig};
pub use error::{Error, ErrorKind, Result};
pub use fetcher::Fetcher;
pub use pipeline::Pipeline;
pub use registry::{DatasetDefinition, SentinelRule};
pub use stash::StashLayout;
pub use tabular::{read_csv, write_csv};
pub use transport::{FileTransport, HttpTransport, SourceTransport};
pub use types::{DatasetReport, Record};
pub use wrangler::wrangle;
