//! Shared fixtures for the mock-server tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dailymotion_core::playlist::header_pairs;
use dailymotion_core::{
    ClientConfig, DailymotionClient, DailymotionExtractor, ExpandRequest, PlaylistExpander,
    ResolvedVideo, Result, SubtitleTrack,
};
use reqwest::header::HeaderMap;
use wiremock::MockServer;

pub const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html><head>
<script>window.__PLAYER_CONFIG__ = {"context":{"api":{"client_id":"cid42","client_secret":"s3cr3t","client_scope":"openapi lax_read"}},"dmInternalData":{"ts":123,"v1st":"abc","dmvk":"vk9"}};</script>
</head><body></body></html>"#;

/// What the resolver handed to the expansion step
#[derive(Debug, Clone)]
pub struct ExpandCall {
    pub manifest_url: String,
    pub headers: HeaderMap,
    pub subtitles: Vec<SubtitleTrack>,
    pub sample_name: String,
}

/// Expander that records its input and returns one "720p" variant
#[derive(Default)]
pub struct RecordingExpander {
    calls: Mutex<Vec<ExpandCall>>,
}

impl RecordingExpander {
    pub fn calls(&self) -> Vec<ExpandCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistExpander for RecordingExpander {
    async fn expand(&self, request: ExpandRequest<'_>) -> Result<Vec<ResolvedVideo>> {
        let headers = (request.headers_gen)(&HeaderMap::new(), request.manifest_url);
        let sample_name = (request.name_gen)("720p");

        self.calls.lock().unwrap().push(ExpandCall {
            manifest_url: request.manifest_url.to_string(),
            headers: headers.clone(),
            subtitles: request.subtitles.to_vec(),
            sample_name: sample_name.clone(),
        });

        Ok(vec![ResolvedVideo {
            display_name: sample_name,
            manifest_url: request.manifest_url.to_string(),
            headers: header_pairs(&headers),
            subtitle_tracks: request.subtitles.to_vec(),
        }])
    }
}

/// Client configuration pointing every endpoint at the mock server
pub fn mock_config(server: &MockServer) -> ClientConfig {
    ClientConfig {
        timeout_secs: 5,
        dailymotion_url: server.uri(),
        graphql_url: server.uri(),
        ..ClientConfig::default()
    }
}

/// Extractor backed by the mock server and a recording expander
pub fn recording_extractor(config: ClientConfig) -> (DailymotionExtractor, Arc<RecordingExpander>) {
    let expander = Arc::new(RecordingExpander::default());
    let client = DailymotionClient::with_config(config).unwrap();
    let extractor = DailymotionExtractor::from_parts(client, expander.clone());
    (extractor, expander)
}

pub fn page_url(server: &MockServer, video_id: &str) -> String {
    format!("{}/video/{}", server.uri(), video_id)
}
