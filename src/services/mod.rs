//! Service layer.
//!
//! Holds the request handlers behind the phone-check and validation
//! operations (`FeedService`).

mod feed_service;

pub use feed_service::FeedService;
