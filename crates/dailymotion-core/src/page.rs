//! Page context scraping
//!
//! Fetches a Dailymotion page and extracts the values needed to call the
//! provider's internal APIs.

use tracing::debug;

use crate::client::DailymotionClient;
use crate::error::Result;
use crate::parser::parse_internal_data;
use crate::types::PageContext;
use crate::url::extract_video_id;

/// Fetches video pages and builds a [`PageContext`] from them
#[derive(Debug, Clone)]
pub struct PageContextScraper {
    client: DailymotionClient,
}

impl PageContextScraper {
    pub fn new(client: DailymotionClient) -> Self {
        Self { client }
    }

    /// Fetch `page_url` and extract `ts`, `v1st` and the video id
    ///
    /// # Errors
    /// - `InvalidUrl` if no video id can be derived from `page_url`
    /// - `HttpError` if the page cannot be fetched
    /// - `Scrape` if the internal data markers are missing from the HTML
    pub async fn scrape(&self, page_url: &str) -> Result<PageContext> {
        let video_id = extract_video_id(page_url)?;

        let raw_html = self
            .client
            .get_text(page_url, self.client.extractor_headers()?)
            .await?;
        debug!(bytes = raw_html.len(), "Fetched page HTML");

        let internal = parse_internal_data(&raw_html)?;
        debug!(%video_id, ts = %internal.timestamp, "Extracted page context");

        Ok(PageContext {
            timestamp: internal.timestamp,
            visitor_id: internal.visitor_id,
            video_id,
            raw_html,
        })
    }
}
