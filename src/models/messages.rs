//! Request and response messages of the feed service.
//!
//! These mirror the RPC surface (`CheckPhones*`, `ValidateFeed*`); the
//! transport itself lives outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Lot, Provider};

/// Feed locations, one optional slot per provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domclick: Option<String>,
}

impl FeedUrls {
    pub fn get(&self, provider: Provider) -> Option<&str> {
        let slot = match provider {
            Provider::Realty => &self.realty,
            Provider::Cian => &self.cian,
            Provider::Avito => &self.avito,
            Provider::Domclick => &self.domclick,
        };
        slot.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Fill the slot of one provider.
    pub fn with(mut self, provider: Provider, url: impl Into<String>) -> Self {
        let slot = match provider {
            Provider::Realty => &mut self.realty,
            Provider::Cian => &mut self.cian,
            Provider::Avito => &mut self.avito,
            Provider::Domclick => &mut self.domclick,
        };
        *slot = Some(url.into());
        self
    }

    /// Location for a provider, or a request error when the slot is empty.
    pub fn require(&self, provider: Provider) -> Result<&str> {
        self.get(provider)
            .ok_or_else(|| AppError::request(format!("{provider} feed url is missing")))
    }

    /// All filled slots in provider order.
    pub fn present(&self) -> Vec<(Provider, &str)> {
        Provider::ALL
            .into_iter()
            .filter_map(|provider| self.get(provider).map(|url| (provider, url)))
            .collect()
    }
}

/// Request of every `CheckPhones*` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    pub urls: FeedUrls,
}

/// Extracted lots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckResponse {
    pub lots: Vec<Lot>,
}

/// Request of `ValidateFeed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFeedRequest {
    pub provider: Provider,
    pub url: String,
}

/// Diagnostics of a single feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateFeedResponse {
    pub provider: Provider,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
}

/// Request of `ValidateFeedAll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateFeedAllRequest {
    pub urls: FeedUrls,
}

/// One entry of `ValidateFeedAll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedReport {
    pub provider: Provider,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
    /// Set when the feed could not be fetched or parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl FeedReport {
    pub fn is_clean(&self) -> bool {
        self.failure.is_none() && self.errors.is_empty()
    }
}

impl From<ValidateFeedResponse> for FeedReport {
    fn from(response: ValidateFeedResponse) -> Self {
        Self {
            provider: response.provider,
            url: response.url,
            last_modified: response.last_modified,
            errors: response.errors,
            failure: None,
        }
    }
}

/// Aggregate result of `ValidateFeedAll`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateFeedAllResponse {
    pub reports: Vec<FeedReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_skips_blank_slots() {
        let urls = FeedUrls {
            realty: Some("https://a/realty.xml".to_string()),
            cian: Some("  ".to_string()),
            avito: None,
            domclick: Some("https://a/dc.xml".to_string()),
        };

        let present = urls.present();
        assert_eq!(
            present,
            vec![
                (Provider::Realty, "https://a/realty.xml"),
                (Provider::Domclick, "https://a/dc.xml"),
            ]
        );
        assert!(urls.require(Provider::Cian).is_err());

        let filled = urls.with(Provider::Cian, "feeds/cian.xml");
        assert_eq!(filled.require(Provider::Cian).unwrap(), "feeds/cian.xml");
    }

    #[test]
    fn test_request_json_shape() {
        let request: CheckRequest =
            serde_json::from_str(r#"{"urls":{"avito":"https://a/ads.xml"}}"#).unwrap();
        assert_eq!(request.urls.get(Provider::Avito), Some("https://a/ads.xml"));
        assert_eq!(request.urls.get(Provider::Realty), None);
    }
}
