// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Resilient fetcher against a local mock server

use httpmock::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use yamusic_track_info::fetcher::{FetchConfig, PageFetcher, ResilientFetcher, RetryPolicy};
use yamusic_track_info::track::TrackError;

const TRACK_PATH: &str = "/album/1/track/2";

fn fetcher(max_retries: u32, initial_delay: Duration) -> ResilientFetcher {
    let config = FetchConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_retries,
            initial_delay,
            max_delay: Duration::from_secs(10),
            ..RetryPolicy::default()
        },
        ..FetchConfig::default()
    };
    ResilientFetcher::with_rng(config, StdRng::seed_from_u64(42)).unwrap()
}

#[tokio::test]
async fn test_success_returns_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html><body>Трек</body></html>");
        })
        .await;

    let body = fetcher(2, Duration::from_millis(10))
        .fetch(&server.url(TRACK_PATH))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, "<html><body>Трек</body></html>");
}

#[tokio::test]
async fn test_browser_headers_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(TRACK_PATH)
                .header("accept-language", "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7")
                .header("upgrade-insecure-requests", "1")
                .header_exists("user-agent")
                .header_exists("accept");
            then.status(200).body("ok");
        })
        .await;

    let body = fetcher(0, Duration::from_millis(10))
        .fetch(&server.url(TRACK_PATH))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_not_found_is_terminal() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(404);
        })
        .await;

    let result = fetcher(3, Duration::from_millis(10))
        .fetch(&server.url(TRACK_PATH))
        .await;

    mock.assert_hits_async(1).await;
    assert_eq!(result.unwrap_err(), TrackError::NotFound { status: 404 });
}

#[tokio::test]
async fn test_unavailable_exhausts_retries() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(503);
        })
        .await;

    let result = fetcher(2, Duration::from_millis(10))
        .fetch(&server.url(TRACK_PATH))
        .await;

    mock.assert_hits_async(3).await;
    assert_eq!(result.unwrap_err(), TrackError::Unavailable { status: 503 });
}

#[tokio::test]
async fn test_status_outside_policy_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(503);
        })
        .await;

    let policy = RetryPolicy {
        max_retries: 3,
        initial_delay: Duration::from_millis(10),
        retry_on_status: vec![429],
        ..RetryPolicy::default()
    };
    let result = fetcher(0, Duration::from_millis(10))
        .fetch_with_policy(&server.url(TRACK_PATH), &policy)
        .await;

    mock.assert_hits_async(1).await;
    assert!(matches!(result, Err(TrackError::Unavailable { .. })));
}

#[tokio::test]
async fn test_retry_after_replaces_backoff() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(429).header("retry-after", "0");
        })
        .await;

    // Regular backoff would sleep 5s + 10s; Retry-After: 0 skips it
    let started = Instant::now();
    let result = fetcher(2, Duration::from_secs(5))
        .fetch(&server.url(TRACK_PATH))
        .await;

    assert!(started.elapsed() < Duration::from_secs(4));
    mock.assert_hits_async(3).await;
    assert_eq!(result.unwrap_err(), TrackError::RateLimited { status: 429 });
}

#[tokio::test]
async fn test_redirect_followed() {
    let server = MockServer::start_async().await;
    let redirect = server
        .mock_async(|when, then| {
            when.method(GET).path("/old-link");
            then.status(302).header("location", TRACK_PATH);
        })
        .await;
    let target = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(200).body("moved here");
        })
        .await;

    let body = fetcher(0, Duration::from_millis(10))
        .fetch(&server.url("/old-link"))
        .await
        .unwrap();

    redirect.assert_async().await;
    target.assert_async().await;
    assert_eq!(body, "moved here");
}

#[tokio::test]
async fn test_cookies_persist_between_fetches() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/first");
            then.status(200)
                .header("set-cookie", "session=abc123; Path=/")
                .body("first");
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(TRACK_PATH)
                .header("cookie", "session=abc123");
            then.status(200).body("second");
        })
        .await;

    let fetcher = fetcher(0, Duration::from_millis(10));
    fetcher.fetch(&server.url("/first")).await.unwrap();
    let body = fetcher.fetch(&server.url(TRACK_PATH)).await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    assert_eq!(body, "second");
}

#[tokio::test]
async fn test_connection_refused_after_retries() {
    let result = fetcher(1, Duration::from_millis(10))
        .fetch("http://127.0.0.1:1/album/1/track/2")
        .await;

    let error = result.unwrap_err();
    assert!(
        matches!(
            error,
            TrackError::ConnectionFailure(_) | TrackError::ConnectTimeout(_)
        ),
        "unexpected error: {:?}",
        error
    );
}

#[tokio::test]
async fn test_slow_response_retried_then_read_timeout() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(TRACK_PATH);
            then.status(200)
                .delay(Duration::from_millis(1500))
                .body("too late");
        })
        .await;

    let config = FetchConfig {
        timeout: Duration::from_millis(300),
        connect_timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_retries: 1,
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
            ..RetryPolicy::default()
        },
        ..FetchConfig::default()
    };
    let fetcher = ResilientFetcher::with_rng(config, StdRng::seed_from_u64(3)).unwrap();
    let result = fetcher.fetch(&server.url(TRACK_PATH)).await;

    mock.assert_hits_async(2).await;
    assert!(
        matches!(result, Err(TrackError::ReadTimeout(_))),
        "unexpected result: {:?}",
        result
    );
}
