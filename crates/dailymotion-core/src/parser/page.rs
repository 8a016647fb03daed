//! Marker-based extraction from Dailymotion page HTML
//!
//! The page embeds its player state as JSON inside a `<script>` tag. These
//! functions locate individual values by key name. They are coupled to the
//! current page layout: when Dailymotion changes it, adjust the affected
//! [`Marker`] here and nothing else.

use regex::Regex;

use crate::error::{DailymotionError, Result};
use crate::types::OAuthCredentials;

/// A single value embedded in the page, located by a regex with one capture group
#[derive(Debug, Clone, Copy)]
pub struct Marker {
    /// Name reported in `Scrape` errors
    pub name: &'static str,
    /// Pattern whose first capture group is the value
    pub pattern: &'static str,
}

/// Start of the internal data blob; the blob runs up to the next `</script>`
pub const INTERNAL_DATA_KEY: &str = "\"dmInternalData\":";

const SCRIPT_END: &str = "</script>";

pub const TS: Marker = Marker {
    name: "ts",
    pattern: r#""ts"\s*:\s*"?(\d+)"#,
};

pub const V1ST: Marker = Marker {
    name: "v1st",
    pattern: r#""v1st"\s*:\s*"([^"]+)""#,
};

pub const CLIENT_ID: Marker = Marker {
    name: "client_id",
    pattern: r#"client_id"\s*:\s*"([^"]+)""#,
};

pub const CLIENT_SECRET: Marker = Marker {
    name: "client_secret",
    pattern: r#"client_secret"\s*:\s*"([^"]+)""#,
};

pub const CLIENT_SCOPE: Marker = Marker {
    name: "client_scope",
    pattern: r#"client_scope"\s*:\s*"([^"]+)""#,
};

/// Per-session verification key, only needed for protected videos
pub const DMVK: Marker = Marker {
    name: "dmvk",
    pattern: r#""dmvk"\s*:\s*"([^"]+)""#,
};

/// `ts` and `v1st` read from the internal data blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalData {
    pub timestamp: String,
    pub visitor_id: String,
}

/// Extracts a single marker value from `source`
///
/// # Errors
/// Returns `Scrape` with the marker name if the pattern does not match
pub fn extract_marker(source: &str, marker: &Marker) -> Result<String> {
    let not_found = || DailymotionError::Scrape(marker.name.to_string());

    let Ok(re) = Regex::new(marker.pattern) else {
        return Err(not_found());
    };

    re.captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(not_found)
}

/// Returns the `dmInternalData` blob, bounded by the next `</script>`
pub fn internal_data_blob(html: &str) -> Result<&str> {
    let start = html
        .find(INTERNAL_DATA_KEY)
        .map(|pos| pos + INTERNAL_DATA_KEY.len())
        .ok_or_else(|| DailymotionError::Scrape("dmInternalData".to_string()))?;

    let rest = &html[start..];
    let end = rest.find(SCRIPT_END).unwrap_or(rest.len());
    Ok(&rest[..end])
}

/// Parses `ts` and `v1st` from the page's internal data blob
///
/// # Errors
/// Returns `Scrape` if the blob or either value is missing
pub fn parse_internal_data(html: &str) -> Result<InternalData> {
    let blob = internal_data_blob(html)?;
    Ok(InternalData {
        timestamp: extract_marker(blob, &TS)?,
        visitor_id: extract_marker(blob, &V1ST)?,
    })
}

/// Parses the OAuth client credentials embedded in the page
pub fn parse_oauth_credentials(html: &str) -> Result<OAuthCredentials> {
    Ok(OAuthCredentials {
        client_id: extract_marker(html, &CLIENT_ID)?,
        client_secret: extract_marker(html, &CLIENT_SECRET)?,
        scope: extract_marker(html, &CLIENT_SCOPE)?,
    })
}

/// Parses the `dmvk` verification key embedded in the page
pub fn parse_dmvk(html: &str) -> Result<String> {
    extract_marker(html, &DMVK)
}
