//! Video resolution
//!
//! Ties the page scraper, the metadata endpoint and the manifest expander
//! together. Public resolution never fails: every error is logged and
//! turned into an empty list so one broken URL cannot take down a batch.

mod protected;

use std::sync::Arc;

use reqwest::header::HeaderMap;
use tracing::{debug, info, instrument, warn};

use crate::client::DailymotionClient;
use crate::error::{DailymotionError, Result};
use crate::page::PageContextScraper;
use crate::parser::{MetadataResult, PlayableMetadata, parse_metadata};
use crate::playlist::{ExpandRequest, PlaylistExpander};
use crate::types::{ResolveOptions, ResolvedVideo};
use crate::url::build_metadata_url;

/// Resolves Dailymotion page URLs into playable videos
#[derive(Clone)]
pub struct VideoResolver {
    client: DailymotionClient,
    pages: PageContextScraper,
    expander: Arc<dyn PlaylistExpander>,
}

impl VideoResolver {
    /// Create a resolver from a client and a manifest expander
    pub fn new(client: DailymotionClient, expander: Arc<dyn PlaylistExpander>) -> Self {
        Self {
            pages: PageContextScraper::new(client.clone()),
            client,
            expander,
        }
    }

    /// Resolve a page URL into zero or more playable videos
    ///
    /// Never fails. Missing markers, network errors, unexpected responses
    /// and provider errors other than a password lock all yield an empty list.
    #[instrument(skip_all, fields(url = %page_url))]
    pub async fn resolve(&self, page_url: &str, options: &ResolveOptions) -> Vec<ResolvedVideo> {
        match self.try_resolve(page_url, options).await {
            Ok(videos) => {
                info!(count = videos.len(), "Resolved videos");
                videos
            }
            Err(e) => {
                warn!(error = %e, "Resolution failed");
                Vec::new()
            }
        }
    }

    async fn try_resolve(
        &self,
        page_url: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<ResolvedVideo>> {
        let context = self.pages.scrape(page_url).await?;

        let config = self.client.config();
        let metadata_url = build_metadata_url(
            &config.dailymotion_url,
            &context.video_id,
            &config.locale,
            &context.visitor_id,
            &context.timestamp,
        );
        let body = self
            .client
            .get_text(&metadata_url, self.client.extractor_headers()?)
            .await?;

        let result = parse_metadata(&body)?;
        debug!(?result, "Classified metadata");

        match result {
            MetadataResult::Playable(metadata) => {
                self.normalize(&metadata, &options.name_prefix, None).await
            }
            MetadataResult::PasswordProtected { opaque_video_id } => {
                info!(%opaque_video_id, "Video is password protected");
                self.resolve_protected(page_url, &context, &opaque_video_id, options)
                    .await
            }
            MetadataResult::OtherError { error_type } => Err(
                DailymotionError::UnsupportedState(format!("metadata error: {}", error_type)),
            ),
            MetadataResult::Malformed => Err(DailymotionError::UnsupportedState(
                "metadata without qualities or error".to_string(),
            )),
        }
    }

    /// Hand playable metadata to the manifest expander
    ///
    /// `headers` are used for the manifest requests when given, otherwise the
    /// default extractor headers. Every produced name starts with `name_prefix`.
    /// Returns an empty list when the metadata has no `auto` manifest.
    pub async fn normalize(
        &self,
        metadata: &PlayableMetadata,
        name_prefix: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Vec<ResolvedVideo>> {
        let Some(manifest_url) = metadata.manifest_url.as_deref() else {
            warn!("Metadata has no auto manifest");
            return Ok(Vec::new());
        };

        let chosen = match headers {
            Some(headers) => headers,
            None => self.client.extractor_headers()?,
        };
        let headers_gen = move |_: &HeaderMap, _: &str| chosen.clone();
        let name_gen = |quality: &str| format!("{}{}", name_prefix, quality);

        debug!(
            manifest_url,
            subtitles = metadata.subtitle_tracks.len(),
            "Expanding manifest"
        );
        self.expander
            .expand(ExpandRequest {
                manifest_url,
                headers_gen: &headers_gen,
                subtitles: &metadata.subtitle_tracks,
                name_gen: &name_gen,
            })
            .await
    }
}
