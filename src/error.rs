// src/error.rs

//! Unified error handling for feed fetching, parsing and extraction.
//!
//! Validation findings are not errors: they are returned as plain strings by
//! the validators. Everything in here aborts the current call.

use std::fmt;

use thiserror::Error;

use crate::models::Provider;

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed server answered with a non-200 status
    #[error("feed not available. Status: {status} ({url})")]
    Status { url: String, status: u16 },

    /// `Last-Modified` header or generation date could not be parsed
    #[error("invalid last modified date '{value}': {message}")]
    LastModified { value: String, message: String },

    /// XML document could not be deserialized
    #[error("cannot parse {provider} feed: {message}")]
    Xml { provider: String, message: String },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Phone number has no 11-digit run
    #[error("cannot convert phone number '{0}'")]
    PhoneConversion(String),

    /// Development identifier missing from the catalog
    #[error("mapping not found for development id '{0}'")]
    MappingNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed service request
    #[error("Invalid request: {0}")]
    Request(String),
}

impl AppError {
    /// Create an XML parse error for a provider.
    pub fn xml(provider: Provider, message: impl fmt::Display) -> Self {
        Self::Xml {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a date parsing error.
    pub fn last_modified(value: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::LastModified {
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a request error.
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }
}
