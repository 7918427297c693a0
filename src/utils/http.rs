// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, LAST_MODIFIED};

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Parse an RFC 1123 `Last-Modified` value, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|time| time.with_timezone(&Utc))
        .map_err(|e| AppError::last_modified(value, e))
}

/// Read the `Last-Modified` header; `None` when the server sent none.
pub fn last_modified(headers: &HeaderMap) -> Result<Option<DateTime<Utc>>> {
    let Some(value) = headers.get(LAST_MODIFIED) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|e| AppError::last_modified(String::from_utf8_lossy(value.as_bytes()), e))?;
    parse_http_date(value).map(Some)
}
