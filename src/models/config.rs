//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Provider;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP fetching settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Per-provider feed thresholds
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.fetch.developments_url)?;

        for provider in Provider::ALL {
            let policy = self.rules.policy(provider);
            if policy.max_images > 0 && policy.min_images > policy.max_images {
                return Err(AppError::config(format!(
                    "rules.{provider}.min_images must be <= max_images"
                )));
            }
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Location of the Avito new developments catalog
    #[serde(default = "defaults::developments_url")]
    pub developments_url: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            developments_url: defaults::developments_url(),
        }
    }
}

/// Feed-level thresholds, one table per provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "defaults::realty")]
    pub realty: FeedPolicy,

    #[serde(default = "defaults::cian")]
    pub cian: FeedPolicy,

    #[serde(default = "defaults::avito")]
    pub avito: FeedPolicy,

    #[serde(default = "defaults::domclick")]
    pub domclick: FeedPolicy,
}

impl RulesConfig {
    pub fn policy(&self, provider: Provider) -> &FeedPolicy {
        match provider {
            Provider::Realty => &self.realty,
            Provider::Cian => &self.cian,
            Provider::Avito => &self.avito,
            Provider::Domclick => &self.domclick,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            realty: defaults::realty(),
            cian: defaults::cian(),
            avito: defaults::avito(),
            domclick: defaults::domclick(),
        }
    }
}

/// Gate thresholds and collection bounds for one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPolicy {
    /// A feed with fewer listings than this is reported as empty
    #[serde(default = "defaults::min_listings")]
    pub min_listings: usize,

    /// A feed with at most this many listings is reported as thin (0 disables)
    #[serde(default = "defaults::thin_threshold")]
    pub thin_threshold: usize,

    /// Minimum images per listing (0 disables)
    #[serde(default)]
    pub min_images: usize,

    /// Maximum images per listing (0 disables)
    #[serde(default)]
    pub max_images: usize,
}

impl FeedPolicy {
    /// Image bounds, if the provider enforces them.
    pub fn image_bounds(&self) -> Option<(usize, usize)> {
        if self.min_images == 0 && self.max_images == 0 {
            None
        } else {
            let max = if self.max_images == 0 {
                usize::MAX
            } else {
                self.max_images
            };
            Some((self.min_images, max))
        }
    }
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self {
            min_listings: defaults::min_listings(),
            thin_threshold: defaults::thin_threshold(),
            min_images: 0,
            max_images: 0,
        }
    }
}

mod defaults {
    use super::FeedPolicy;

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; price-placements/0.1)".into()
    }
    pub fn timeout() -> u64 {
        60
    }
    pub fn developments_url() -> String {
        "https://autoload.avito.ru/format/New_developments.xml".into()
    }

    // Gate defaults
    pub fn min_listings() -> usize {
        1
    }
    pub fn thin_threshold() -> usize {
        10
    }

    // Provider defaults
    pub fn realty() -> FeedPolicy {
        FeedPolicy {
            min_images: 3,
            max_images: 40,
            ..FeedPolicy::default()
        }
    }
    pub fn cian() -> FeedPolicy {
        FeedPolicy::default()
    }
    pub fn avito() -> FeedPolicy {
        FeedPolicy {
            min_images: 3,
            max_images: 40,
            ..FeedPolicy::default()
        }
    }
    pub fn domclick() -> FeedPolicy {
        FeedPolicy::default()
    }
}
