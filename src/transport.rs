//! Retrieval of raw bytes from a source location
//!
//! The fetcher only needs "give me the whole body for this URL". How that
//! happens depends on the scheme, so each scheme family sits behind the
//! [`SourceTransport`] trait.

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// A way of retrieving the full body behind a URL
#[async_trait]
pub trait SourceTransport: Send + Sync {
    /// URL schemes this transport handles (lowercase)
    fn schemes(&self) -> &[&'static str];

    /// Read the entire body behind `url`
    ///
    /// # Errors
    /// Implementations return a transport error when the location cannot be
    /// reached or answers with anything other than a body.
    async fn retrieve(&self, url: &Url) -> Result<Vec<u8>>;

    /// Whether this transport handles `url`
    fn supports(&self, url: &Url) -> bool {
        self.schemes().iter().any(|scheme| *scheme == url.scheme())
    }
}

/// HTTP and HTTPS retrieval via reqwest
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport using the configured user agent and optional timeout
    ///
    /// Without a configured timeout a request waits as long as the source takes.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceTransport for HttpTransport {
    fn schemes(&self) -> &[&'static str] {
        &["http", "https"]
    }

    async fn retrieve(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "sending GET request");

        let response = self.client.get(url.clone()).send().await?;

        // Check HTTP status before trying to read the body
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let body = response.bytes().await?;
        debug!(%url, bytes = body.len(), "response body received");
        Ok(body.to_vec())
    }
}

/// `file://` retrieval from the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTransport;

#[async_trait]
impl SourceTransport for FileTransport {
    fn schemes(&self) -> &[&'static str] {
        &["file"]
    }

    async fn retrieve(&self, url: &Url) -> Result<Vec<u8>> {
        let path = url.to_file_path().map_err(|()| Error::Transport {
            url: url.to_string(),
            reason: "not a local file path".to_string(),
        })?;

        debug!(path = %path.display(), "reading local source");
        tokio::fs::read(&path).await.map_err(|e| Error::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
