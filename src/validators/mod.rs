// src/validators/mod.rs

//! Provider validators.
//!
//! Every validator is a read-only walk over a parsed feed returning findings
//! in document order. A feed with findings is still a successful check.

mod avito;
mod cian;
mod domclick;
mod realty;

use chrono::{Datelike, Local};

use crate::checks::rules::RuleEnv;
use crate::feeds::Feed;
use crate::models::{Provider, RulesConfig};

/// A parsed feed that can check itself.
pub trait FeedCheck {
    fn check(&self, env: &RuleEnv) -> Vec<String>;
}

/// Validates feeds of any provider against the configured thresholds.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RulesConfig,
    current_year: i32,
}

impl Validator {
    /// Create a validator using the current local year for deadline checks.
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            current_year: Local::now().year(),
        }
    }

    /// Pin the year used by deadline checks.
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn env(&self, provider: Provider) -> RuleEnv {
        RuleEnv {
            current_year: self.current_year,
            policy: *self.rules.policy(provider),
        }
    }

    /// Validate a feed, returning findings in document order.
    pub fn validate(&self, feed: &Feed) -> Vec<String> {
        let env = self.env(feed.provider());
        let findings = match feed {
            Feed::Realty(feed) => feed.check(&env),
            Feed::Cian(feed) => feed.check(&env),
            Feed::Avito(feed) => feed.check(&env),
            Feed::Domclick(feed) => feed.check(&env),
        };
        log::info!(
            "Validated {} feed: {} listings, {} findings",
            feed.provider(),
            feed.listing_count(),
            findings.len()
        );
        findings
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}
