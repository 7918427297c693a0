// src/lib.rs

//! Real-estate classifieds feed validation and phone-check extraction.

pub mod adapters;
pub mod checks;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod models;
pub mod services;
pub mod utils;
pub mod validators;
