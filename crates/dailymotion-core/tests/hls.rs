//! HLS expansion against a mock CDN

mod common;

use common::{PAGE_HTML, mock_config, page_url};
use dailymotion_core::{
    DailymotionClient, DailymotionExtractor, ExpandRequest, HlsExpander, PlaylistExpander,
    SubtitleTrack,
};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MASTER: &str = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360
360/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2500000,RESOLUTION=1280x720
720/index.m3u8
#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=90000,RESOLUTION=1280x720,URI=\"720/iframes.m3u8\"
";

const MEDIA: &str = "#EXTM3U
#EXT-X-TARGETDURATION:10
#EXT-X-VERSION:3
#EXTINF:9.009,
segment0.ts
#EXT-X-ENDLIST
";

#[tokio::test]
async fn test_master_playlist_expands_per_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hls/master.m3u8"))
        .and(header("x-test", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
        .expect(1)
        .mount(&server)
        .await;

    let expander = HlsExpander::new(reqwest::Client::new(), HeaderMap::new());
    let mut chosen = HeaderMap::new();
    chosen.insert("x-test", HeaderValue::from_static("yes"));
    let headers_gen = move |_: &HeaderMap, _: &str| chosen.clone();
    let name_gen = |quality: &str| format!("Dailymotion - {}", quality);
    let subtitles = vec![SubtitleTrack {
        label: "English".to_string(),
        url: "https://host/en.vtt".to_string(),
    }];

    let manifest_url = format!("{}/hls/master.m3u8", server.uri());
    let videos = expander
        .expand(ExpandRequest {
            manifest_url: &manifest_url,
            headers_gen: &headers_gen,
            subtitles: &subtitles,
            name_gen: &name_gen,
        })
        .await
        .unwrap();

    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].display_name, "Dailymotion - 360p");
    assert_eq!(
        videos[0].manifest_url,
        format!("{}/hls/360/index.m3u8", server.uri())
    );
    assert_eq!(videos[1].display_name, "Dailymotion - 720p");
    assert_eq!(
        videos[1].manifest_url,
        format!("{}/hls/720/index.m3u8", server.uri())
    );
    for video in &videos {
        assert_eq!(video.headers["x-test"], "yes");
        assert_eq!(video.subtitle_tracks, subtitles);
    }
}

#[tokio::test]
async fn test_media_playlist_yields_single_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hls/media.m3u8"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MEDIA))
        .mount(&server)
        .await;

    let expander = HlsExpander::new(reqwest::Client::new(), HeaderMap::new());
    let headers_gen = |base: &HeaderMap, _: &str| base.clone();
    let name_gen = |quality: &str| format!("DM - {}", quality);

    let manifest_url = format!("{}/hls/media.m3u8", server.uri());
    let videos = expander
        .expand(ExpandRequest {
            manifest_url: &manifest_url,
            headers_gen: &headers_gen,
            subtitles: &[],
            name_gen: &name_gen,
        })
        .await
        .unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].display_name, "DM - Video");
    assert_eq!(videos[0].manifest_url, manifest_url);
}

#[tokio::test]
async fn test_manifest_fetch_failure_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hls/master.m3u8"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let expander = HlsExpander::new(reqwest::Client::new(), HeaderMap::new());
    let headers_gen = |base: &HeaderMap, _: &str| base.clone();
    let name_gen = |quality: &str| quality.to_string();

    let manifest_url = format!("{}/hls/master.m3u8", server.uri());
    let result = expander
        .expand(ExpandRequest {
            manifest_url: &manifest_url,
            headers_gen: &headers_gen,
            subtitles: &[],
            name_gen: &name_gen,
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_default_extractor_expands_hls_with_extractor_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/video/xyz789"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE_HTML))
        .mount(&server)
        .await;

    let manifest_url = format!("{}/hls/master.m3u8", server.uri());
    Mock::given(method("GET"))
        .and(path("/player/metadata/video/xyz789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "qualities": {"auto": [{"url": manifest_url}]},
            "subtitles": {"data": []}
        })))
        .mount(&server)
        .await;

    let referer = format!("{}/", server.uri());
    Mock::given(method("GET"))
        .and(path("/hls/master.m3u8"))
        .and(header(REFERER.as_str(), referer.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
        .expect(1)
        .mount(&server)
        .await;

    let client = DailymotionClient::with_config(mock_config(&server)).unwrap();
    let extractor = DailymotionExtractor::with_client(client);
    let videos = extractor
        .videos_from_url(&page_url(&server, "xyz789"))
        .await;

    let names: Vec<&str> = videos.iter().map(|v| v.display_name.as_str()).collect();
    assert_eq!(names, vec!["Dailymotion - 360p", "Dailymotion - 720p"]);
    assert!(videos.iter().all(|v| v.subtitle_tracks.is_empty()));
    assert!(videos.iter().all(|v| v.headers["referer"] == referer));
}
