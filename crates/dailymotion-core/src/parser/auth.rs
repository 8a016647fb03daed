//! Parsers for the OAuth token and GraphQL responses used by the password flow

use serde::Deserialize;

use crate::error::{DailymotionError, Result};
use crate::types::AccessToken;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: Option<String>,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProtectedResponse {
    data: Option<ProtectedData>,
}

#[derive(Debug, Deserialize)]
struct ProtectedData {
    video: Option<ProtectedVideo>,
}

#[derive(Debug, Deserialize)]
struct ProtectedVideo {
    xid: Option<String>,
}

/// Parses the client-credentials token response
///
/// # Errors
/// Returns `ParseError` if the body is not JSON or either token field is missing
pub fn parse_access_token(body: &str) -> Result<AccessToken> {
    let raw: TokenResponse = serde_json::from_str(body)
        .map_err(|e| DailymotionError::ParseError(format!("token: {}", e)))?;

    match (non_empty(raw.token_type), non_empty(raw.access_token)) {
        (Some(token_type), Some(access_token)) => Ok(AccessToken {
            token_type,
            access_token,
        }),
        _ => Err(DailymotionError::ParseError(
            "token response without token_type/access_token".to_string(),
        )),
    }
}

/// Parses the real video id (`data.video.xid`) from the GraphQL response
///
/// # Errors
/// Returns `ParseError` if the body is not JSON or the id is absent, which is
/// also what a wrong password produces
pub fn parse_protected_video_id(body: &str) -> Result<String> {
    let raw: ProtectedResponse = serde_json::from_str(body)
        .map_err(|e| DailymotionError::ParseError(format!("graphql: {}", e)))?;

    raw.data
        .and_then(|data| data.video)
        .and_then(|video| non_empty(video.xid))
        .ok_or_else(|| {
            DailymotionError::ParseError("graphql response without video xid".to_string())
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
