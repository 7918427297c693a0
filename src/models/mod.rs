// src/models/mod.rs

//! Domain models shared across the crate.
//!
//! Feed entity structures live in [`crate::feeds`]; this module holds the
//! configuration, provider identity and service messages.

mod config;
mod lot;
mod messages;
mod provider;

// Re-export all public types
pub use config::{Config, FeedPolicy, FetchConfig, RulesConfig};
pub use lot::Lot;
pub use messages::{
    CheckRequest, CheckResponse, FeedReport, FeedUrls, ValidateFeedAllRequest,
    ValidateFeedAllResponse, ValidateFeedRequest, ValidateFeedResponse,
};
pub use provider::Provider;
