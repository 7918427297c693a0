//! Network feed source.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{AppError, Result};
use crate::fetch::{FeedFetcher, FetchedDocument};
use crate::models::FetchConfig;
use crate::utils::{get_domain, http};

/// Fetches feeds over HTTP(S) with one shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
        })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument> {
        log::debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let last_modified = http::last_modified(response.headers())?;
        if last_modified.is_none() {
            log::warn!(
                "No Last-Modified header from {}",
                get_domain(url).unwrap_or_else(|| url.to_string())
            );
        }

        let body = response.bytes().await?.to_vec();
        log::info!("Fetched {} bytes from {url}", body.len());
        Ok(FetchedDocument {
            url: url.to_string(),
            body,
            last_modified,
        })
    }
}
