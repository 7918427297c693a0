//! Local filesystem feed source.
//!
//! Used for documents saved to disk and in tests. Files carry no
//! `Last-Modified`, so Realty documents fall back to their generation date.

use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::fetch::{FeedFetcher, FetchedDocument};

/// Reads feeds from plain paths or `file://` URLs.
#[derive(Debug, Clone, Default)]
pub struct LocalFetcher {
    root_dir: Option<PathBuf>,
}

impl LocalFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root_dir`.
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: Some(root_dir.into()),
        }
    }

    fn path(&self, location: &str) -> PathBuf {
        let path = Url::parse(location)
            .ok()
            .filter(|url| url.scheme() == "file")
            .and_then(|url| url.to_file_path().ok())
            .unwrap_or_else(|| PathBuf::from(location));
        match &self.root_dir {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        }
    }
}

#[async_trait]
impl FeedFetcher for LocalFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        let path = self.path(url);
        let body = tokio::fs::read(&path).await?;
        log::debug!("Read {} bytes from {}", body.len(), path.display());
        Ok(FetchedDocument {
            url: url.to_string(),
            body,
            last_modified: None,
        })
    }
}
