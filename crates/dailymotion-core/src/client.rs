//! HTTP client for Dailymotion pages and APIs
//!
//! Wraps a `reqwest::Client` together with the caller's base headers and
//! applies the extractor header policy (`Accept`, `Referer`, `Origin`) to
//! every request.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER};
use tracing::debug;

use crate::error::{DailymotionError, Result};
use crate::url::{DAILYMOTION_URL, DEFAULT_LOCALE, GRAPHQL_URL};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User agent sent with every request
    pub user_agent: String,
    /// Site base URL (default: <https://www.dailymotion.com>)
    pub dailymotion_url: String,
    /// GraphQL API base URL (default: <https://graphql.api.dailymotion.com>)
    pub graphql_url: String,
    /// Locale passed to the metadata endpoint (default: "en-US")
    pub locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: USER_AGENT.to_string(),
            dailymotion_url: DAILYMOTION_URL.to_string(),
            graphql_url: GRAPHQL_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

/// HTTP client wrapper shared by the page scraper and the resolver
///
/// Holds no per-call state: cookies and tokens are built for each request
/// and never stored, so one client can serve concurrent resolutions.
#[derive(Debug, Clone)]
pub struct DailymotionClient {
    http: reqwest::Client,
    base_headers: HeaderMap,
    config: ClientConfig,
}

impl DailymotionClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(DailymotionError::HttpError)?;

        Ok(Self::from_parts(http, HeaderMap::new(), config))
    }

    /// Create a client from a host-provided HTTP client and base headers
    ///
    /// The base headers are sent with every request, under the extractor
    /// header policy.
    pub fn from_parts(
        http: reqwest::Client,
        base_headers: HeaderMap,
        config: ClientConfig,
    ) -> Self {
        Self {
            http,
            base_headers,
            config,
        }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Get the caller-supplied base headers
    pub fn base_headers(&self) -> &HeaderMap {
        &self.base_headers
    }

    /// Builds the default extractor header set
    ///
    /// Base headers plus `Accept: */*`, `Referer: <site>/` and `Origin: <site>`.
    pub fn extractor_headers(&self) -> Result<HeaderMap> {
        let site = self.config.dailymotion_url.trim_end_matches('/');
        let mut headers = self.base_headers.clone();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        set_header(&mut headers, REFERER, &format!("{}/", site))?;
        set_header(&mut headers, ORIGIN, site)?;
        Ok(headers)
    }

    /// Fetch a URL with the given headers and return the body as text
    ///
    /// # Errors
    /// - `HttpError` - Network errors or a non-success status
    pub async fn get_text(&self, url: &str, headers: HeaderMap) -> Result<String> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .headers(headers)
            .send()
            .await?
            .error_for_status()?;

        response.text().await.map_err(DailymotionError::HttpError)
    }

    /// POST a form-encoded body and return the response body as text
    pub async fn post_form(
        &self,
        url: &str,
        headers: HeaderMap,
        form: &[(&str, &str)],
    ) -> Result<String> {
        debug!(url, "POST form");
        let response = self
            .http
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?
            .error_for_status()?;

        response.text().await.map_err(DailymotionError::HttpError)
    }

    /// POST a JSON body and return the response body as text
    pub async fn post_json(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &serde_json::Value,
    ) -> Result<String> {
        debug!(url, "POST json");
        let response = self
            .http
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        response.text().await.map_err(DailymotionError::HttpError)
    }
}

/// Sets a header from a runtime string, replacing any previous value
pub(crate) fn set_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value)
        .map_err(|_| DailymotionError::InvalidHeader(name.to_string()))?;
    headers.insert(name, value);
    Ok(())
}
