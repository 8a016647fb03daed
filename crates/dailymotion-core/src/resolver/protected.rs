//! Password-protected videos
//!
//! The metadata endpoint only returns an opaque id for locked videos. To get
//! the playable metadata we exchange the page's OAuth client credentials for
//! a token, trade the opaque id plus the password for the real id over
//! GraphQL, and refetch metadata with a session cookie built from the token.

use reqwest::header::{ACCEPT, AUTHORIZATION, COOKIE, HeaderValue, REFERER};
use serde_json::json;
use tracing::{debug, info};

use super::VideoResolver;
use crate::client::set_header;
use crate::error::{DailymotionError, Result};
use crate::parser::{
    MetadataResult, parse_access_token, parse_dmvk, parse_metadata, parse_oauth_credentials,
    parse_protected_video_id,
};
use crate::types::{AccessToken, OAuthCredentials, PageContext, ResolveOptions, ResolvedVideo};
use crate::url::{build_embedded_metadata_url, build_token_url, embedder_for};

const PASSWORD_QUERY: &str = "query playerPasswordQuery($videoId:String!,$password:String!){video(xid:$videoId,password:$password){id xid}}";

const GRAPHQL_ACCEPT: &str = "application/json, text/plain, */*";

impl VideoResolver {
    pub(super) async fn resolve_protected(
        &self,
        page_url: &str,
        context: &PageContext,
        opaque_video_id: &str,
        options: &ResolveOptions,
    ) -> Result<Vec<ResolvedVideo>> {
        let credentials = parse_oauth_credentials(&context.raw_html)?;
        let token = self.fetch_access_token(&credentials, context).await?;
        info!(token_type = %token.token_type, "Received access token");

        let real_video_id = self
            .fetch_real_video_id(&token, opaque_video_id, options.password.as_deref())
            .await?;
        info!(%real_video_id, "Unlocked protected video");

        let dmvk = parse_dmvk(&context.raw_html)?;

        let config = self.client.config();
        let metadata_url = build_embedded_metadata_url(
            &config.dailymotion_url,
            &real_video_id,
            &embedder_for(&options.base_url),
            &config.locale,
            &context.visitor_id,
            &context.timestamp,
        );

        let mut headers = self.client.extractor_headers()?;
        let cookie = session_cookie(&dmvk, context, &token);
        set_header(&mut headers, COOKIE, &cookie)?;
        set_header(&mut headers, REFERER, page_url)?;

        let body = self.client.get_text(&metadata_url, headers.clone()).await?;
        let result = parse_metadata(&body)?;
        debug!(?result, "Classified unlocked metadata");

        match result {
            MetadataResult::Playable(metadata) => {
                self.normalize(&metadata, &options.name_prefix, Some(headers))
                    .await
            }
            other => Err(DailymotionError::UnsupportedState(format!(
                "unlocked metadata not playable: {:?}",
                other
            ))),
        }
    }

    async fn fetch_access_token(
        &self,
        credentials: &OAuthCredentials,
        context: &PageContext,
    ) -> Result<AccessToken> {
        let url = build_token_url(&self.client.config().graphql_url);
        debug!(client_id = %credentials.client_id, "Requesting access token");

        let form = [
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("traffic_segment", context.timestamp.as_str()),
            ("visitor_id", context.visitor_id.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", credentials.scope.as_str()),
        ];
        let body = self
            .client
            .post_form(&url, self.client.extractor_headers()?, &form)
            .await?;

        parse_access_token(&body)
    }

    async fn fetch_real_video_id(
        &self,
        token: &AccessToken,
        opaque_video_id: &str,
        password: Option<&str>,
    ) -> Result<String> {
        let mut headers = self.client.extractor_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(GRAPHQL_ACCEPT));
        set_header(&mut headers, AUTHORIZATION, &token.authorization())?;

        let body = password_query_body(opaque_video_id, password);
        let response = self
            .client
            .post_json(&self.client.config().graphql_url, headers, &body)
            .await?;

        parse_protected_video_id(&response)
    }
}

/// GraphQL request unlocking `opaque_video_id`; a missing password is sent as ""
fn password_query_body(opaque_video_id: &str, password: Option<&str>) -> serde_json::Value {
    json!({
        "query": PASSWORD_QUERY,
        "variables": {
            "videoId": opaque_video_id,
            "password": password.unwrap_or_default(),
        }
    })
}

fn session_cookie(dmvk: &str, context: &PageContext, token: &AccessToken) -> String {
    format!(
        "dmvk={}; ts={}; v1st={}; usprivacy=1---; client_token={}",
        dmvk, context.timestamp, context.visitor_id, token.access_token
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PageContext {
        PageContext {
            timestamp: "123".to_string(),
            visitor_id: "abc".to_string(),
            video_id: "xyz789".to_string(),
            raw_html: String::new(),
        }
    }

    #[test]
    fn test_session_cookie() {
        let token = AccessToken {
            token_type: "Bearer".to_string(),
            access_token: "tok1".to_string(),
        };
        assert_eq!(
            session_cookie("vk9", &context(), &token),
            "dmvk=vk9; ts=123; v1st=abc; usprivacy=1---; client_token=tok1"
        );
    }

    #[test]
    fn test_password_query_body() {
        let body = password_query_body("opaque1", Some("hunter2"));
        assert_eq!(body["variables"]["videoId"], "opaque1");
        assert_eq!(body["variables"]["password"], "hunter2");
        assert!(body["query"].as_str().unwrap().contains("playerPasswordQuery"));
    }

    #[test]
    fn test_password_query_body_escapes_password() {
        let body = password_query_body("opaque1", Some(r#"pa"ss\word"#));
        let serialized = body.to_string();
        assert!(serialized.contains(r#""password":"pa\"ss\\word""#));
    }

    #[test]
    fn test_password_query_body_without_password() {
        let body = password_query_body("opaque1", None);
        assert_eq!(body["variables"]["password"], "");
    }
}
