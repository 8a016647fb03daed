//! URL helper functions for Dailymotion
//!
//! Provides endpoint constants, metadata URL builders and video id derivation.

use url::Url;

use crate::error::{DailymotionError, Result};

/// Public site, also used as `Origin`/`Referer` for extractor headers
pub const DAILYMOTION_URL: &str = "https://www.dailymotion.com";

/// GraphQL API base, also hosts the OAuth token endpoint
pub const GRAPHQL_URL: &str = "https://graphql.api.dailymotion.com";

/// Locale sent to the metadata endpoint
pub const DEFAULT_LOCALE: &str = "en-US";

/// Builds the player metadata URL for a video
///
/// # Arguments
/// * `base` - Site base URL (normally [`DAILYMOTION_URL`])
/// * `video_id` - Video id to look up
/// * `locale` - Locale, e.g. "en-US"
/// * `visitor_id` - Scraped `v1st` value
/// * `timestamp` - Scraped `ts` value
///
/// # Example
/// ```
/// use dailymotion_core::url::build_metadata_url;
/// let url = build_metadata_url("https://www.dailymotion.com", "x8abc", "en-US", "v1", "123");
/// assert_eq!(
///     url,
///     "https://www.dailymotion.com/player/metadata/video/x8abc?locale=en-US&dmV1st=v1&dmTs=123&is_native_app=0"
/// );
/// ```
pub fn build_metadata_url(
    base: &str,
    video_id: &str,
    locale: &str,
    visitor_id: &str,
    timestamp: &str,
) -> String {
    format!(
        "{}/player/metadata/video/{}?{}",
        base,
        urlencoding::encode(video_id),
        metadata_query(locale, visitor_id, timestamp)
    )
}

/// Builds the metadata URL used after unlocking a protected video
///
/// Same as [`build_metadata_url`] with an extra leading `embedder` parameter.
///
/// # Example
/// ```
/// use dailymotion_core::url::build_embedded_metadata_url;
/// let url = build_embedded_metadata_url(
///     "https://www.dailymotion.com", "real1", "https://anichin.club/", "en-US", "v1", "123",
/// );
/// assert!(url.starts_with(
///     "https://www.dailymotion.com/player/metadata/video/real1?embedder=https%3A%2F%2Fanichin.club%2F&locale=en-US"
/// ));
/// ```
pub fn build_embedded_metadata_url(
    base: &str,
    video_id: &str,
    embedder: &str,
    locale: &str,
    visitor_id: &str,
    timestamp: &str,
) -> String {
    format!(
        "{}/player/metadata/video/{}?embedder={}&{}",
        base,
        urlencoding::encode(video_id),
        urlencoding::encode(embedder),
        metadata_query(locale, visitor_id, timestamp)
    )
}

fn metadata_query(locale: &str, visitor_id: &str, timestamp: &str) -> String {
    format!(
        "locale={}&dmV1st={}&dmTs={}&is_native_app=0",
        urlencoding::encode(locale),
        urlencoding::encode(visitor_id),
        urlencoding::encode(timestamp)
    )
}

/// Builds the OAuth token endpoint URL from the GraphQL base
pub fn build_token_url(graphql_base: &str) -> String {
    format!("{}/oauth/token", graphql_base.trim_end_matches('/'))
}

/// Embedder value derived from the embedding site's base URL
///
/// # Example
/// ```
/// use dailymotion_core::url::embedder_for;
/// assert_eq!(embedder_for("https://anichin.club"), "https://anichin.club/");
/// ```
pub fn embedder_for(base_url: &str) -> String {
    format!("{}/", base_url)
}

/// Derives the video id from a page URL
///
/// Uses the `video` query parameter when present (embed player URLs),
/// otherwise the last non-empty path segment.
///
/// # Errors
/// Returns `InvalidUrl` if the URL cannot be parsed or has no usable segment
///
/// # Example
/// ```
/// use dailymotion_core::url::extract_video_id;
/// assert_eq!(extract_video_id("https://www.dailymotion.com/video/x8abc").unwrap(), "x8abc");
/// assert_eq!(
///     extract_video_id("https://geo.dailymotion.com/player.html?video=x9def").unwrap(),
///     "x9def"
/// );
/// ```
pub fn extract_video_id(page_url: &str) -> Result<String> {
    let parsed = Url::parse(page_url)
        .map_err(|e| DailymotionError::InvalidUrl(format!("{}: {}", page_url, e)))?;

    if let Some((_, video)) = parsed.query_pairs().find(|(key, _)| key == "video")
        && !video.is_empty()
    {
        return Ok(video.into_owned());
    }

    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| DailymotionError::InvalidUrl(format!("{}: no video id", page_url)))
}

/// Checks whether a URL points at a Dailymotion page or short link
///
/// # Example
/// ```
/// use dailymotion_core::url::is_dailymotion_url;
/// assert!(is_dailymotion_url("https://www.dailymotion.com/embed/video/x8abc"));
/// assert!(is_dailymotion_url("https://dai.ly/x8abc"));
/// assert!(!is_dailymotion_url("https://ok.ru/videoembed/1"));
/// ```
pub fn is_dailymotion_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    match parsed.host_str() {
        Some(host) => {
            host == "dai.ly" || host == "dailymotion.com" || host.ends_with(".dailymotion.com")
        }
        None => false,
    }
}
