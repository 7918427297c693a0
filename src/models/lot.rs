//! Normalized phone-check record.

use serde::{Deserialize, Serialize};

/// Minimal projection of a listing used for phone verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lot {
    /// Listing identifier as published in the feed
    pub id: String,

    /// Normalized development / building name
    pub object: String,

    /// Phone number, digits only
    pub phone: u64,
}
