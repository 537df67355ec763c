//! Fetch raw feed text and keep a verbatim copy on disk

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::transport::{FileTransport, HttpTransport, SourceTransport};
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Retrieves source text and persists it unmodified
///
/// Dispatches on the URL scheme to the first registered [`SourceTransport`]
/// that supports it. There is no retry: one failure is returned as-is.
pub struct Fetcher {
    transports: Vec<Box<dyn SourceTransport>>,
}

impl Fetcher {
    /// Fetcher with the standard HTTP(S) and `file://` transports
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(http: &HttpConfig) -> Result<Self> {
        Ok(Self::with_transports(vec![
            Box::new(HttpTransport::new(http)?),
            Box::new(FileTransport),
        ]))
    }

    /// Fetcher with an explicit transport list, consulted in order
    pub fn with_transports(transports: Vec<Box<dyn SourceTransport>>) -> Self {
        Self { transports }
    }

    /// Retrieve `location`, write it verbatim to `destination`, and return the text
    ///
    /// The destination's parent directories are created as needed and any
    /// existing file is overwritten.
    ///
    /// # Errors
    /// - [`Error::UnsupportedScheme`] if no transport handles the URL
    /// - a transport error if the location is unreachable, answers with an
    ///   error, returns no data, or returns bytes that are not UTF-8
    /// - [`Error::Io`] if the directory or file cannot be written
    pub async fn fetch_and_persist(&self, location: &Url, destination: &Path) -> Result<String> {
        let transport = self
            .transports
            .iter()
            .find(|t| t.supports(location))
            .ok_or_else(|| Error::UnsupportedScheme {
                url: location.to_string(),
                scheme: location.scheme().to_string(),
            })?;

        let bytes = transport.retrieve(location).await?;
        if bytes.is_empty() {
            return Err(Error::Transport {
                url: location.to_string(),
                reason: "response contained no data".to_string(),
            });
        }

        let text = String::from_utf8(bytes).map_err(|e| Error::Transport {
            url: location.to_string(),
            reason: format!("response is not valid UTF-8: {}", e),
        })?;

        persist_text(destination, &text).await?;
        info!(
            url = %location,
            path = %destination.display(),
            bytes = text.len(),
            "saved raw copy"
        );

        Ok(text)
    }
}

/// Write `text` to `destination`, creating parent directories first
pub(crate) async fn persist_text(destination: &Path, text: &str) -> Result<()> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        debug!(dir = %parent.display(), "ensuring directory exists");
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }

    tokio::fs::write(destination, text)
        .await
        .map_err(|e| Error::io(destination, e))
}
