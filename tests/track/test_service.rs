// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// End-to-end lookups: real fetcher, local mock server, cascade and cache

use httpmock::prelude::*;
use regex::Regex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use yamusic_track_info::cache::CacheConfig;
use yamusic_track_info::fetcher::{FetchConfig, PageFetcher, ResilientFetcher, RetryPolicy};
use yamusic_track_info::service::{MessageHandler, Reply, TrackInfoService};
use yamusic_track_info::track::{TrackError, TrackId};

const TRACK_PATH: &str = "/album/12345/track/67890";

const TRACK_PAGE: &str = r#"<html><head>
    <script type="application/ld+json">{
        "@context": "https://schema.org",
        "@type": "MusicRecording",
        "name": "Spleen",
        "byArtist": [{"name": "Miyagi"}, {"name": "Эндшпиль"}],
        "duration": "PT3M45S",
        "inAlbum": {"name": "Hajime"}
    }</script>
</head><body></body></html>"#;

fn service() -> TrackInfoService {
    let fetch = FetchConfig {
        retry: RetryPolicy {
            max_retries: 1,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
            ..RetryPolicy::default()
        },
        ..FetchConfig::default()
    };
    let fetcher = ResilientFetcher::with_rng(fetch, StdRng::seed_from_u64(7)).unwrap();
    TrackInfoService::with_fetcher(Arc::new(fetcher), &CacheConfig::default())
}

#[tokio::test]
async fn test_lookup_is_cached() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(200).body(TRACK_PAGE);
        })
        .await;

    let service = service();
    let url = server.url(TRACK_PATH);
    let key = TrackId::new("12345", "67890");

    let record = service.get_track_info(&url, Some(&key)).await.unwrap();
    assert_eq!(record.name, "Spleen");
    assert_eq!(record.artist, "Miyagi feat. Эндшпиль");
    assert_eq!(record.duration, "3:45");
    assert_eq!(record.album.as_deref(), Some("Hajime"));
    assert_eq!(record.url.as_deref(), Some(url.as_str()));

    let again = service.get_track_info(&url, Some(&key)).await.unwrap();
    assert_eq!(again, record);

    // Only the first lookup reached the server
    mock.assert_hits_async(1).await;
    let stats = service.cache_stats();
    assert_eq!(stats.size, 1);
    assert_eq!(stats.hits, 1);

    service.close().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_lookups_share_one_service() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path_matches(Regex::new(r"^/album/12345/track/\d+$").unwrap());
            then.status(200).body(TRACK_PAGE);
        })
        .await;

    let service = Arc::new(service());
    let mut tasks = Vec::new();
    for n in 0..16 {
        let service = Arc::clone(&service);
        let url = server.url(format!("/album/12345/track/{}", n));
        tasks.push(tokio::spawn(async move {
            let key = TrackId::new("12345", &n.to_string());
            service.get_track_info(&url, Some(&key)).await
        }));
    }

    for task in tasks {
        let record = task.await.unwrap().unwrap();
        assert_eq!(record.name, "Spleen");
    }

    mock.assert_hits_async(16).await;
    let stats = service.cache_stats();
    assert_eq!(stats.size, 16);
    assert_eq!(stats.misses, 16);
}

#[tokio::test]
async fn test_server_error_surfaces_after_retries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(502);
        })
        .await;

    let service = service();
    let key = TrackId::new("12345", "67890");
    let result = service
        .get_track_info(&server.url(TRACK_PATH), Some(&key))
        .await;

    mock.assert_hits_async(2).await;
    assert_eq!(result.unwrap_err(), TrackError::BadGateway { status: 502 });
    assert_eq!(service.cache_stats().size, 0);
}

#[tokio::test]
async fn test_page_without_track_data() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(200).body("<html><body>Ничего не найдено</body></html>");
        })
        .await;

    let result = service().get_track_info(&server.url(TRACK_PATH), None).await;
    assert_eq!(result.unwrap_err(), TrackError::AllStrategiesFailed);
}

#[tokio::test]
async fn test_handler_ignores_unrelated_text() {
    let handler = MessageHandler::new(Arc::new(service()));
    assert_eq!(handler.handle("привет, как дела?").await, Reply::NotRecognized);
    assert_eq!(
        handler.handle("https://music.yandex.ru/artist/41052").await,
        Reply::Failed(TrackError::ArtistUrl(
            "https://music.yandex.ru/artist/41052".to_string()
        ))
    );
    assert_eq!(handler.service().cache_stats().misses, 0);
}

#[test]
fn test_closed_fetcher_rejects_requests() {
    tokio_test::block_on(async {
        let fetcher = ResilientFetcher::new(FetchConfig::default()).unwrap();
        fetcher.close().await;
        let result = fetcher.fetch("https://music.yandex.ru/album/1/track/2").await;
        assert!(matches!(result, Err(TrackError::ConnectionFailure(_))));
    });
}
