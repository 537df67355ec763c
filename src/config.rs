//! Configuration types for climate-stash
//!
//! Only the run environment is configurable (where files land, how the HTTP
//! client behaves). The dataset table itself is fixed; see [`crate::registry`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::Path, path::PathBuf, time::Duration};

/// HTTP client settings used by [`crate::transport::HttpTransport`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds (default: none, wait as long as the source takes)
    #[serde(
        with = "optional_duration_serde",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for a stash run
///
/// Every field has a default, so an empty TOML file is a valid config.
///
/// ```
/// use climate_stash::Config;
///
/// let config: Config = toml::from_str("stash_dir = \"/var/lib/stash\"").unwrap();
/// assert_eq!(config.stash_dir, std::path::PathBuf::from("/var/lib/stash"));
/// assert!(config.http.timeout.is_none());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Root storage directory holding `raw/` and `wrangled/` (default: "datastash")
    #[serde(default = "default_stash_dir")]
    pub stash_dir: PathBuf,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stash_dir: default_stash_dir(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if it
    /// is not valid TOML or fails [`Config::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let config: Config = toml::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
            key: None,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every run fail
    pub fn validate(&self) -> Result<()> {
        if self.stash_dir.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "stash directory must not be empty".to_string(),
                key: Some("stash_dir".to_string()),
            });
        }

        if self.http.user_agent.trim().is_empty() {
            return Err(Error::Config {
                message: "user agent must not be blank".to_string(),
                key: Some("http.user_agent".to_string()),
            });
        }

        Ok(())
    }
}

fn default_stash_dir() -> PathBuf {
    PathBuf::from("datastash")
}

fn default_user_agent() -> String {
    format!("climate-stash/{}", env!("CARGO_PKG_VERSION"))
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
