//! Dailymotion Extractor Core Library
//!
//! Provides async API for turning Dailymotion page and embed URLs into
//! playable HLS streams with subtitle tracks.
//!
//! # Overview
//!
//! This crate provides a complete extraction flow for Dailymotion with:
//! - A page scraper that reads the player state embedded in the HTML
//! - A resolver that calls the player metadata endpoint
//! - An unlock flow for password-protected videos (OAuth token, GraphQL
//!   lookup, cookie-authenticated metadata refetch)
//! - A pluggable manifest expander, with an HLS implementation by default
//!
//! # Example
//!
//! ```no_run
//! use dailymotion_core::{DailymotionExtractor, ResolveOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let extractor = DailymotionExtractor::new()?;
//!
//!     let videos = extractor
//!         .videos_from_url("https://www.dailymotion.com/video/x8abc")
//!         .await;
//!
//!     for video in &videos {
//!         println!("{}: {}", video.display_name, video.manifest_url);
//!     }
//!
//!     // Password-protected video embedded on another site
//!     let options = ResolveOptions::default()
//!         .base_url("https://anichin.club")
//!         .password("hunter2");
//!     let locked = extractor
//!         .videos_from_url_with("https://www.dailymotion.com/video/k3lock", &options)
//!         .await;
//!     println!("{} locked variants", locked.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Resolution never returns an error. A missing page marker, a network
//! failure or an unexpected response yields an empty list, so callers cannot
//! tell "no video" from "extraction failed". Details are emitted as
//! `tracing` events.
//!
//! **Important:** the produced headers carry a short-lived access token and
//! session cookie. Do not cache resolved videos long-term.

mod client;
mod error;
mod extractor;
mod page;
pub mod parser;
pub mod playlist;
mod resolver;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, DailymotionClient};

// Re-export error types
pub use error::{DailymotionError, Result};

// Re-export parser types
pub use parser::{MetadataResult, PlayableMetadata, parse_metadata};

// Re-export main extractor API
pub use extractor::DailymotionExtractor;
pub use page::PageContextScraper;
pub use playlist::{ExpandRequest, HlsExpander, PlaylistExpander};
pub use resolver::VideoResolver;

// Re-export data types
pub use types::{
    AccessToken, DEFAULT_NAME_PREFIX, OAuthCredentials, PageContext, ResolveOptions,
    ResolvedVideo, SubtitleTrack,
};

// Re-export URL helper functions for convenience
pub use url::{extract_video_id, is_dailymotion_url};
