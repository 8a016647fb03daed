//! Main extractor API for Dailymotion
//!
//! Provides the high-level entry point combining the HTTP client, the
//! resolver and the default HLS expander.

use std::sync::Arc;

use crate::client::{ClientConfig, DailymotionClient};
use crate::error::Result;
use crate::playlist::{HlsExpander, PlaylistExpander};
use crate::resolver::VideoResolver;
use crate::types::{ResolveOptions, ResolvedVideo};

/// Main extractor API for Dailymotion
///
/// Turns Dailymotion page or embed URLs into playable HLS variants with
/// subtitles. Resolution is best effort: failures produce an empty list.
#[derive(Clone)]
pub struct DailymotionExtractor {
    resolver: VideoResolver,
}

impl DailymotionExtractor {
    /// Create a new extractor with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new extractor with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = DailymotionClient::with_config(config)?;
        Ok(Self::with_client(client))
    }

    /// Create an extractor on top of an existing client, expanding manifests with [`HlsExpander`]
    pub fn with_client(client: DailymotionClient) -> Self {
        let expander = HlsExpander::new(client.http().clone(), client.base_headers().clone());
        Self::from_parts(client, Arc::new(expander))
    }

    /// Create an extractor with a custom manifest expander
    pub fn from_parts(client: DailymotionClient, expander: Arc<dyn PlaylistExpander>) -> Self {
        Self {
            resolver: VideoResolver::new(client, expander),
        }
    }

    /// Get the underlying resolver
    pub fn resolver(&self) -> &VideoResolver {
        &self.resolver
    }

    /// Resolve a page URL with the default options
    ///
    /// Names are prefixed with `"Dailymotion - "`, no embedder and no password.
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> dailymotion_core::Result<()> {
    /// use dailymotion_core::DailymotionExtractor;
    /// let extractor = DailymotionExtractor::new()?;
    /// let videos = extractor
    ///     .videos_from_url("https://www.dailymotion.com/video/x8abc")
    ///     .await;
    /// for video in videos {
    ///     println!("{}: {}", video.display_name, video.manifest_url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn videos_from_url(&self, url: &str) -> Vec<ResolvedVideo> {
        self.resolver.resolve(url, &ResolveOptions::default()).await
    }

    /// Resolve a page URL with explicit options
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> dailymotion_core::Result<()> {
    /// use dailymotion_core::{DailymotionExtractor, ResolveOptions};
    /// let extractor = DailymotionExtractor::new()?;
    /// let options = ResolveOptions::with_prefix("Episode 3 - ")
    ///     .base_url("https://anichin.club")
    ///     .password("hunter2");
    /// let videos = extractor
    ///     .videos_from_url_with("https://www.dailymotion.com/video/x8abc", &options)
    ///     .await;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn videos_from_url_with(
        &self,
        url: &str,
        options: &ResolveOptions,
    ) -> Vec<ResolvedVideo> {
        self.resolver.resolve(url, options).await
    }

    /// Resolve several page URLs one after another and concatenate the results
    ///
    /// A URL that fails contributes nothing; the others are still resolved.
    pub async fn videos_from_urls<S: AsRef<str>>(
        &self,
        urls: &[S],
        options: &ResolveOptions,
    ) -> Vec<ResolvedVideo> {
        let mut videos = Vec::new();
        for url in urls {
            videos.extend(self.resolver.resolve(url.as_ref(), options).await);
        }
        videos
    }
}
