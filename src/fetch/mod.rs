//! Feed document sources.
//!
//! A fetcher turns a feed location into raw bytes plus the server's
//! `Last-Modified` time. Parsing happens elsewhere.

pub mod http;
pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::FetchConfig;
use crate::utils::is_remote;

pub use http::HttpFetcher;
pub use local::LocalFetcher;

/// A fetched, not yet parsed, document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Location the document was read from
    pub url: String,
    pub body: Vec<u8>,
    /// `None` when the source reported no modification time
    pub last_modified: Option<DateTime<Utc>>,
}

/// Trait for feed sources.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Read the whole document at `url`.
    async fn fetch(&self, url: &str) -> Result<FetchedDocument>;
}

/// Routes HTTP(S) locations to the network and everything else to disk.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: HttpFetcher,
    local: LocalFetcher,
}

impl SourceFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            local: LocalFetcher::new(),
        })
    }
}

#[async_trait]
impl FeedFetcher for SourceFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        if is_remote(url) {
            self.http.fetch(url).await
        } else {
            self.local.fetch(url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_source_fetcher_reads_local_paths() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<feed/>").unwrap();

        let fetcher = SourceFetcher::new(&FetchConfig::default()).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let document = fetcher.fetch(&path).await.unwrap();

        assert_eq!(document.body, b"<feed/>");
        assert_eq!(document.url, path);
    }
}
