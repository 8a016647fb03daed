//! Error types for the Dailymotion extractor
//!
//! Every failure that can happen while resolving a page maps onto one of
//! these variants. None of them reach the caller of
//! [`crate::VideoResolver::resolve`], which degrades to an empty list.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all extractor operations
///
/// Implements Display for human-readable messages and Serialize so a host
/// application can forward it over an IPC boundary.
#[derive(Error, Debug)]
pub enum DailymotionError {
    /// An embedded marker was not found in the page HTML
    #[error("Marker not found in page: {0}")]
    Scrape(String),

    /// HTTP request failed or returned a non-success status
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Provider reported a state this extractor cannot handle
    #[error("Unsupported state: {0}")]
    UnsupportedState(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A value could not be used as an HTTP header
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl Serialize for DailymotionError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for extractor operations
pub type Result<T> = std::result::Result<T, DailymotionError>;
