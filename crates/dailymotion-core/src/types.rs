//! Core data types for the Dailymotion extractor
//!
//! Contains the values that flow between the page scraper, the resolver and
//! the manifest expansion step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default prefix prepended to every produced video name
pub const DEFAULT_NAME_PREFIX: &str = "Dailymotion - ";

/// Values scraped from a video page, scoped to a single resolution attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Traffic segment timestamp (`ts`), a numeric string
    pub timestamp: String,

    /// Visitor id (`v1st`)
    pub visitor_id: String,

    /// Video id taken from the `video` query parameter or the last path segment
    pub video_id: String,

    /// Page HTML, kept so the password flow can scrape more markers without a refetch
    pub raw_html: String,
}

/// A subtitle track attached to every produced video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Label exactly as reported by the provider (e.g., "English")
    pub label: String,

    /// URL of the subtitle file
    pub url: String,
}

/// OAuth client credentials embedded in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

/// Token returned by the client-credentials exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Token type (e.g., "Bearer")
    pub token_type: String,

    /// Opaque access token
    pub access_token: String,
}

impl AccessToken {
    /// Value for the `Authorization` header: `"<token_type> <access_token>"`
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// A playable video variant
///
/// The manifest expansion step may turn one manifest into several of these,
/// one per quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVideo {
    /// Human readable name, always starting with the caller's prefix
    pub display_name: String,

    /// URL of the playlist to play
    pub manifest_url: String,

    /// Headers the player must send when fetching the playlist and its segments
    pub headers: BTreeMap<String, String>,

    /// Subtitle tracks available for this video
    pub subtitle_tracks: Vec<SubtitleTrack>,
}

/// Per-call parameters of a resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Prefix prepended to every produced video name
    pub name_prefix: String,

    /// Base URL of the site embedding the video, sent as `embedder` in the password flow
    pub base_url: String,

    /// Password for protected videos
    pub password: Option<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            base_url: String::new(),
            password: None,
        }
    }
}

impl ResolveOptions {
    /// Options with a custom name prefix and otherwise default values
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            name_prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Sets the embedding site's base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the password used for protected videos
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_authorization() {
        let token = AccessToken {
            token_type: "Bearer".to_string(),
            access_token: "tok1".to_string(),
        };
        assert_eq!(token.authorization(), "Bearer tok1");
    }

    #[test]
    fn test_resolve_options_default() {
        let options = ResolveOptions::default();
        assert_eq!(options.name_prefix, "Dailymotion - ");
        assert_eq!(options.base_url, "");
        assert_eq!(options.password, None);
    }

    #[test]
    fn test_resolve_options_builder() {
        let options = ResolveOptions::with_prefix("Episode 1 - ")
            .base_url("https://anichin.club")
            .password("hunter2");
        assert_eq!(options.name_prefix, "Episode 1 - ");
        assert_eq!(options.base_url, "https://anichin.club");
        assert_eq!(options.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_resolved_video_serialization() {
        let mut headers = BTreeMap::new();
        headers.insert("referer".to_string(), "https://www.dailymotion.com/".to_string());

        let video = ResolvedVideo {
            display_name: "Dailymotion - 720p".to_string(),
            manifest_url: "https://host/720.m3u8".to_string(),
            headers,
            subtitle_tracks: vec![SubtitleTrack {
                label: "English".to_string(),
                url: "https://host/en.vtt".to_string(),
            }],
        };

        let json = serde_json::to_string(&video).expect("Serialization should succeed");
        let deserialized: ResolvedVideo =
            serde_json::from_str(&json).expect("Deserialization should succeed");

        assert_eq!(video, deserialized);
    }
}
