//! Error types for climate-stash
//!
//! Failures fall into three groups:
//! - transport failures (source unreachable, bad status, empty or non-text body)
//! - filesystem failures (cannot create a directory, cannot write a file)
//! - configuration failures (malformed config file, inconsistent dataset definition)
//!
//! A line that does not match a dataset's pattern is not an error and never
//! surfaces here.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for climate-stash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for climate-stash
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "stash_dir")
        key: Option<String>,
    },

    /// HTTP client error (connect failure, timeout, body read failure)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The source answered but the answer is unusable
    #[error("transport error fetching {url}: {reason}")]
    Transport {
        /// The location being fetched
        url: String,
        /// Why the response was rejected (status code, empty body, bad encoding)
        reason: String,
    },

    /// No transport is registered for the URL scheme
    #[error("unsupported scheme '{scheme}' in {url}")]
    UnsupportedScheme {
        /// The location being fetched
        url: String,
        /// The scheme no transport handles
        scheme: String,
    },

    /// A source location could not be parsed as a URL
    #[error("invalid source location '{url}': {source}")]
    InvalidUrl {
        /// The offending location string
        url: String,
        /// Parser error
        #[source]
        source: url::ParseError,
    },

    /// Filesystem operation failed on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being read, written or created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization or parsing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A dataset line pattern failed to compile
    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Coarse classification used for exit codes and log fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration or dataset definition
    Config,
    /// Remote retrieval failed
    Transport,
    /// Local disk failure
    Filesystem,
}

impl Error {
    /// Build an I/O error that remembers the path involved
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a configuration error without a specific key
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Which group of failures this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } | Error::Pattern(_) | Error::InvalidUrl { .. } => {
                ErrorKind::Config
            }
            Error::Network(_) | Error::Transport { .. } | Error::UnsupportedScheme { .. } => {
                ErrorKind::Transport
            }
            Error::Io { .. } | Error::Csv(_) => ErrorKind::Filesystem,
        }
    }

    /// Process exit code for this error
    ///
    /// Follows the BSD `sysexits.h` convention: 78 for configuration,
    /// 69 for an unavailable service, 74 for I/O.
    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            ErrorKind::Config => 78,
            ErrorKind::Transport => 69,
            ErrorKind::Filesystem => 74,
        }
    }
}
