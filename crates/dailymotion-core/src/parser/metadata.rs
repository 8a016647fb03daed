//! Player metadata parser
//!
//! Classifies the body returned by `/player/metadata/video/{id}` into a
//! [`MetadataResult`].

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{DailymotionError, Result};
use crate::types::SubtitleTrack;

/// Error type reported for videos that need a password
pub const PASSWORD_PROTECTED: &str = "password_protected";

/// Outcome of a metadata request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataResult {
    /// Qualities present and no error
    Playable(PlayableMetadata),
    /// Video is locked behind a password; carries the opaque id to unlock
    PasswordProtected { opaque_video_id: String },
    /// Any other provider error, or a protected video without an id
    OtherError { error_type: String },
    /// Neither qualities nor error present
    Malformed,
}

/// Playable part of a metadata response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayableMetadata {
    /// First entry of the `auto` quality list, if any
    pub manifest_url: Option<String>,
    pub subtitle_tracks: Vec<SubtitleTrack>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    id: Option<String>,
    qualities: Option<RawQualities>,
    subtitles: Option<RawSubtitles>,
    error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
struct RawQualities {
    #[serde(default)]
    auto: Vec<RawQuality>,
}

#[derive(Debug, Deserialize)]
struct RawQuality {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubtitles {
    data: Option<RawSubtitleData>,
}

// Older player builds send a list, the live API sends a map keyed by language
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSubtitleData {
    List(Vec<RawSubtitle>),
    Map(BTreeMap<String, RawSubtitle>),
}

#[derive(Debug, Deserialize)]
struct RawSubtitle {
    #[serde(default)]
    label: String,
    #[serde(default)]
    urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(rename = "type")]
    error_type: Option<String>,
}

/// Parses a metadata response body
///
/// # Errors
/// Returns `ParseError` if the body is not a JSON object of the expected shape
pub fn parse_metadata(body: &str) -> Result<MetadataResult> {
    let raw: RawMetadata = serde_json::from_str(body)
        .map_err(|e| DailymotionError::ParseError(format!("metadata: {}", e)))?;

    let result = match (raw.qualities, raw.error) {
        (Some(qualities), None) => MetadataResult::Playable(PlayableMetadata {
            manifest_url: qualities.auto.into_iter().next().and_then(|q| q.url),
            subtitle_tracks: raw.subtitles.map(subtitle_tracks).unwrap_or_default(),
        }),
        (_, Some(error)) => {
            let error_type = error.error_type.unwrap_or_else(|| "unknown".to_string());
            match raw.id.filter(|id| !id.is_empty()) {
                Some(id) if error_type == PASSWORD_PROTECTED => {
                    MetadataResult::PasswordProtected { opaque_video_id: id }
                }
                _ => MetadataResult::OtherError { error_type },
            }
        }
        (None, None) => MetadataResult::Malformed,
    };

    Ok(result)
}

fn subtitle_tracks(subtitles: RawSubtitles) -> Vec<SubtitleTrack> {
    let entries: Vec<RawSubtitle> = match subtitles.data {
        Some(RawSubtitleData::List(list)) => list,
        Some(RawSubtitleData::Map(map)) => map.into_values().collect(),
        None => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let url = entry.urls.into_iter().next()?;
            Some(SubtitleTrack {
                label: entry.label,
                url,
            })
        })
        .collect()
}
