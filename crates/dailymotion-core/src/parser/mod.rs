//! Parsers for Dailymotion pages and API responses
//!
//! Contains modules for the page HTML, the player metadata and the
//! password flow responses.

pub mod auth;
pub mod metadata;
pub mod page;

pub use auth::{parse_access_token, parse_protected_video_id};
pub use metadata::{MetadataResult, PlayableMetadata, parse_metadata};
pub use page::{InternalData, parse_dmvk, parse_internal_data, parse_oauth_credentials};
