//! Manifest expansion
//!
//! The resolver hands a manifest URL to a [`PlaylistExpander`], which decides
//! how many [`ResolvedVideo`] entries it turns into. [`HlsExpander`] is the
//! default and splits an HLS master playlist into one entry per variant.

use std::collections::BTreeMap;

use async_trait::async_trait;
use m3u8_rs::{MasterPlaylist, Playlist};
use reqwest::header::HeaderMap;
use tracing::debug;
use url::Url;

use crate::error::{DailymotionError, Result};
use crate::types::{ResolvedVideo, SubtitleTrack};

/// Produces the headers for a playlist request from the base headers and the playlist URL
pub type HeadersGen<'a> = &'a (dyn Fn(&HeaderMap, &str) -> HeaderMap + Send + Sync);

/// Produces a display name from a quality label
pub type NameGen<'a> = &'a (dyn Fn(&str) -> String + Send + Sync);

/// Inputs for a single manifest expansion
pub struct ExpandRequest<'a> {
    pub manifest_url: &'a str,
    pub headers_gen: HeadersGen<'a>,
    pub subtitles: &'a [SubtitleTrack],
    pub name_gen: NameGen<'a>,
}

/// Turns a manifest URL into playable videos
#[async_trait]
pub trait PlaylistExpander: Send + Sync {
    async fn expand(&self, request: ExpandRequest<'_>) -> Result<Vec<ResolvedVideo>>;
}

/// Expands HLS manifests by fetching and parsing the master playlist
#[derive(Debug, Clone)]
pub struct HlsExpander {
    http: reqwest::Client,
    base_headers: HeaderMap,
}

impl HlsExpander {
    pub fn new(http: reqwest::Client, base_headers: HeaderMap) -> Self {
        Self { http, base_headers }
    }
}

#[async_trait]
impl PlaylistExpander for HlsExpander {
    async fn expand(&self, request: ExpandRequest<'_>) -> Result<Vec<ResolvedVideo>> {
        let base_url = Url::parse(request.manifest_url).map_err(|e| {
            DailymotionError::InvalidUrl(format!("{}: {}", request.manifest_url, e))
        })?;
        let headers = (request.headers_gen)(&self.base_headers, request.manifest_url);

        let bytes = self
            .http
            .get(request.manifest_url)
            .headers(headers.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let playlist = m3u8_rs::parse_playlist_res(&bytes)
            .map_err(|e| DailymotionError::ParseError(format!("playlist: {:?}", e)))?;

        let header_pairs = header_pairs(&headers);
        let videos = match playlist {
            Playlist::MasterPlaylist(master) => variants(master, &base_url)
                .into_iter()
                .map(|(url, quality)| ResolvedVideo {
                    display_name: (request.name_gen)(&quality),
                    manifest_url: url,
                    headers: header_pairs.clone(),
                    subtitle_tracks: request.subtitles.to_vec(),
                })
                .collect(),
            Playlist::MediaPlaylist(_) => vec![ResolvedVideo {
                display_name: (request.name_gen)("Video"),
                manifest_url: request.manifest_url.to_string(),
                headers: header_pairs,
                subtitle_tracks: request.subtitles.to_vec(),
            }],
        };

        debug!(count = videos.len(), "Expanded manifest");
        Ok(videos)
    }
}

/// Absolute URL and quality label for every non I-frame variant
fn variants(master: MasterPlaylist, base_url: &Url) -> Vec<(String, String)> {
    master
        .variants
        .into_iter()
        .filter(|variant| !variant.is_i_frame)
        .filter_map(|variant| {
            let url = base_url.join(&variant.uri).ok()?;
            let quality = match variant.resolution {
                Some(resolution) => format!("{}p", resolution.height),
                None => format!("{}kbps", variant.bandwidth / 1000),
            };
            Some((url.to_string(), quality))
        })
        .collect()
}

/// Flattens a header map into name/value pairs
///
/// Repeated values of one header are joined with `", "`. Non-UTF-8 values
/// are dropped.
pub fn header_pairs(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut pairs: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        pairs
            .entry(name.as_str().to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    pairs
}
