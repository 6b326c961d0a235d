// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Cascade extraction over realistic track pages

use yamusic_track_info::extractor::{extract_artists, parse_iso_duration, CascadeExtractor};
use yamusic_track_info::track::{TrackError, UNKNOWN_ARTIST, UNKNOWN_DURATION};

const URL: &str = "https://music.yandex.ru/album/4766/track/57703";

const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
    <title>Кино - Кукушка. Слушать онлайн на Яндекс Музыке</title>
    <meta property="og:title" content="Кукушка — Кино">
    <meta property="og:type" content="music.song">
    <meta property="music:duration" content="399">
    <script type="application/ld+json">
    {
        "@context": "http://schema.org",
        "@type": "MusicRecording",
        "name": "Кукушка",
        "duration": "PT6M39S",
        "byArtist": {"@type": "MusicGroup", "name": "Кино"},
        "inAlbum": {"@type": "MusicAlbum", "name": "Чёрный альбом"}
    }
    </script>
</head>
<body><div class="d-track__title">Кукушка</div></body>
</html>"#;

const OPEN_GRAPH_ONLY: &str = r#"<html><head>
    <meta property="og:title" content="Гореть - Lumen">
    <meta property="og:audio:artist" content="Lumen">
    <meta property="music:duration" content="268">
    <meta property="music:album" content="Правда?">
</head><body></body></html>"#;

const SELECTORS_ONLY: &str = r#"<html><body>
    <div class="page-track">
        <h1 class="page-track__title">Районы-кварталы</h1>
        <div class="page-track__artists"><a href="/artist/1">Звери</a></div>
        <span class="page-track__duration">3:38</span>
    </div>
</body></html>"#;

#[test]
fn test_json_ld_page() {
    let record = CascadeExtractor::new().extract(FULL_PAGE, URL).unwrap();
    assert_eq!(record.name, "Кукушка");
    assert_eq!(record.artist, "Кино");
    assert_eq!(record.duration, "6:39");
    assert_eq!(record.album.as_deref(), Some("Чёрный альбом"));
    assert_eq!(record.url.as_deref(), Some(URL));
}

#[test]
fn test_open_graph_fallback() {
    let record = CascadeExtractor::new().extract(OPEN_GRAPH_ONLY, URL).unwrap();
    assert_eq!(record.name, "Гореть");
    assert_eq!(record.artist, "Lumen");
    assert_eq!(record.duration, "4:28");
    assert_eq!(record.album.as_deref(), Some("Правда?"));
}

#[test]
fn test_selector_fallback() {
    let record = CascadeExtractor::new().extract(SELECTORS_ONLY, URL).unwrap();
    assert_eq!(record.name, "Районы-кварталы");
    assert_eq!(record.artist, "Звери");
    assert_eq!(record.duration, "3:38");
    assert!(record.album.is_none());
}

#[test]
fn test_broken_json_ld_falls_back() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@type": "MusicRecording", "name": </script>
        <meta property="og:title" content="Song — Band">
    </head></html>"#;
    let record = CascadeExtractor::new().extract(html, URL).unwrap();
    assert_eq!(record.name, "Song");
    assert_eq!(record.artist, "Band");
    assert_eq!(record.duration, UNKNOWN_DURATION);
}

#[test]
fn test_captcha_page_fails() {
    let html = r#"<html><head><title>Ой!</title></head>
        <body><form action="/checkcaptcha"><input name="rep"></form></body></html>"#;
    assert_eq!(
        CascadeExtractor::new().extract(html, URL).unwrap_err(),
        TrackError::AllStrategiesFailed
    );
}

#[test]
fn test_artist_and_duration_helpers() {
    let artists = serde_json::json!([
        {"name": "DJ Snake"},
        {"name": "Lil Jon"},
        {"name": "Pitbull"}
    ]);
    assert_eq!(extract_artists(&artists), "DJ Snake feat. Lil Jon, Pitbull");
    assert_eq!(extract_artists(&serde_json::Value::Null), UNKNOWN_ARTIST);

    assert_eq!(parse_iso_duration("PT1H2M30S").unwrap(), "62:30");
    assert!(parse_iso_duration("soon").is_err());
}
