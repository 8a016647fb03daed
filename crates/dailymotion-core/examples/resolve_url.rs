//! Debug script to resolve a Dailymotion URL and print the playable variants
//!
//! Usage: `cargo run --example resolve_url -- <url> [password] [embedder-base-url]`
//! Set `RUST_LOG=dailymotion_core=debug` to trace each step.

use dailymotion_core::{DailymotionExtractor, ResolveOptions, is_dailymotion_url};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("usage: resolve_url <url> [password] [embedder-base-url]");
        return Ok(());
    };

    if !is_dailymotion_url(&url) {
        eprintln!("{} is not a Dailymotion URL", url);
        return Ok(());
    }

    let mut options = ResolveOptions::default();
    if let Some(password) = args.next() {
        options = options.password(password);
    }
    if let Some(base_url) = args.next() {
        options = options.base_url(base_url);
    }

    let extractor = DailymotionExtractor::new()?;
    let videos = extractor.videos_from_url_with(&url, &options).await;

    println!("Found {} video(s)\n", videos.len());
    for video in &videos {
        println!("{}\n  {}", video.display_name, video.manifest_url);
        for track in &video.subtitle_tracks {
            println!("  subtitle {}: {}", track.label, track.url);
        }
    }

    Ok(())
}
