// src/feeds/mod.rs

//! Feed entity model.
//!
//! One module per provider schema. Structures are filled by `quick-xml`'s
//! serde support; the element and attribute names are the wire contract.

pub mod avito;
pub mod cian;
pub mod domclick;
pub mod realty;
pub mod value;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};
use crate::models::Provider;

pub use avito::{AvitoFeed, Developments};
pub use cian::CianFeed;
pub use domclick::DomclickFeed;
pub use realty::RealtyFeed;
pub use value::{CommaDecimal, Flag, Num};

/// A parsed document of any provider.
#[derive(Debug, Clone)]
pub enum Feed {
    Realty(RealtyFeed),
    Cian(CianFeed),
    Avito(AvitoFeed),
    Domclick(DomclickFeed),
}

impl Feed {
    /// Parse raw XML as the given provider's schema.
    pub fn parse(provider: Provider, bytes: &[u8]) -> Result<Self> {
        let feed = match provider {
            Provider::Realty => Feed::Realty(from_xml(provider, bytes)?),
            Provider::Cian => Feed::Cian(from_xml(provider, bytes)?),
            Provider::Avito => Feed::Avito(from_xml(provider, bytes)?),
            Provider::Domclick => Feed::Domclick(from_xml(provider, bytes)?),
        };
        log::debug!("Parsed {} feed with {} listings", provider, feed.listing_count());
        Ok(feed)
    }

    pub fn provider(&self) -> Provider {
        match self {
            Feed::Realty(_) => Provider::Realty,
            Feed::Cian(_) => Provider::Cian,
            Feed::Avito(_) => Provider::Avito,
            Feed::Domclick(_) => Provider::Domclick,
        }
    }

    /// Number of listings the gate checks look at.
    pub fn listing_count(&self) -> usize {
        match self {
            Feed::Realty(feed) => feed.offers.len(),
            Feed::Cian(feed) => feed.objects.len(),
            Feed::Avito(feed) => feed.ads.len(),
            Feed::Domclick(feed) => feed.flat_count(),
        }
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        match self {
            Feed::Realty(feed) => feed.last_modified,
            Feed::Cian(feed) => feed.last_modified,
            Feed::Avito(feed) => feed.last_modified,
            Feed::Domclick(feed) => feed.last_modified,
        }
    }

    /// Attach the `Last-Modified` time reported by the server.
    ///
    /// Realty documents without a header fall back to their
    /// `generation-date`, which must then be valid RFC 3339.
    pub fn with_last_modified(mut self, header: Option<DateTime<Utc>>) -> Result<Self> {
        match &mut self {
            Feed::Realty(feed) => {
                feed.last_modified = match header {
                    Some(time) => Some(time),
                    None => parse_generation_date(&feed.generation_date)?,
                };
            }
            Feed::Cian(feed) => feed.last_modified = header,
            Feed::Avito(feed) => feed.last_modified = header,
            Feed::Domclick(feed) => feed.last_modified = header,
        }
        Ok(self)
    }
}

/// Parse the Avito developments catalog.
pub fn parse_developments(bytes: &[u8]) -> Result<Developments> {
    from_xml(Provider::Avito, bytes)
}

fn from_xml<T: DeserializeOwned>(provider: Provider, bytes: &[u8]) -> Result<T> {
    let text = std::str::from_utf8(bytes).map_err(|e| AppError::xml(provider, e))?;
    quick_xml::de::from_str(text).map_err(|e| AppError::xml(provider, e))
}

fn parse_generation_date(value: &str) -> Result<Option<DateTime<Utc>>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|time| Some(time.with_timezone(&Utc)))
        .map_err(|e| AppError::last_modified(value, e))
}
