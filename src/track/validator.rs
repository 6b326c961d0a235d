// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Validation and classification of incoming track links
//!
//! Two gates are exposed on purpose:
//! - [`looks_like_target_site`] is a cheap host check used to decide whether a
//!   message is meant for us at all (no error raised);
//! - [`classify_track_url`] runs the full rule chain and reports the precise
//!   reason a link is rejected.

use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use super::errors::TrackError;
use super::types::TrackId;

/// Maximum accepted message length, in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Host prefix of the music service
pub const TARGET_HOST_PREFIX: &str = "music.yandex.";

/// Brand name used to tell "another Yandex service" from "foreign site"
const PARENT_BRAND: &str = "yandex";

/// Hosts the track pages are served from
const SERVICE_HOSTS: [&str; 5] = [
    "music.yandex.ru",
    "music.yandex.com",
    "music.yandex.by",
    "music.yandex.kz",
    "music.yandex.ua",
];

/// Album and track identifiers of a validated track link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackUrl {
    pub album_id: String,
    pub track_id: String,
}

impl TrackUrl {
    pub fn cache_key(&self) -> TrackId {
        TrackId::new(&self.album_id, &self.track_id)
    }
}

// Path patterns run against the parsed path, after the host has been checked

fn track_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/album/(?P<album_id>\d+)/track/(?P<track_id>\d+)/?$")
            .expect("track pattern is valid")
    })
}

fn album_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/album/\d+/?$").expect("album pattern is valid"))
}

fn artist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/artist/\d+").expect("artist pattern is valid"))
}

fn playlist_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/users/.*/playlists/\d+").expect("playlist pattern is valid")
    })
}

/// Check the raw message text and return it trimmed
pub fn validate_message_text(text: &str) -> Result<String, TrackError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TrackError::EmptyInput);
    }

    let length = text.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(TrackError::TooLong {
            length,
            limit: MAX_MESSAGE_LENGTH,
        });
    }

    Ok(trimmed.to_string())
}

/// True if the link points anywhere on the music service (any page type)
pub fn looks_like_target_site(url: &str) -> bool {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(|h| h.starts_with(TARGET_HOST_PREFIX)))
        .unwrap_or(false)
}

/// Validate a track link and extract its album and track identifiers
///
/// Rules are checked in order and the first violation is reported. Domain
/// checks run before any path check so a foreign link never gets a
/// track-specific message.
pub fn classify_track_url(url: &str) -> Result<TrackUrl, TrackError> {
    let url = url.trim();

    let parsed = Url::parse(url).map_err(|_| TrackError::NotAUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TrackError::NotAUrl(url.to_string()));
    }
    // Url lowercases the host and keeps port and userinfo out of it
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => return Err(TrackError::NotAUrl(url.to_string())),
    };

    if !host.starts_with(TARGET_HOST_PREFIX) {
        if host.contains(PARENT_BRAND) {
            return Err(TrackError::WrongService(host));
        }
        return Err(TrackError::WrongDomain(host));
    }
    if !SERVICE_HOSTS.contains(&host.as_str()) {
        return Err(TrackError::WrongService(host));
    }

    let path = parsed.path();
    if album_pattern().is_match(path) {
        return Err(TrackError::AlbumUrl(url.to_string()));
    }
    if artist_pattern().is_match(path) {
        return Err(TrackError::ArtistUrl(url.to_string()));
    }
    if playlist_pattern().is_match(path) {
        return Err(TrackError::PlaylistUrl(url.to_string()));
    }

    match track_pattern().captures(path) {
        Some(caps) => Ok(TrackUrl {
            album_id: caps["album_id"].to_string(),
            track_id: caps["track_id"].to_string(),
        }),
        None if path.contains("/album/") && !path.contains("/track/") => {
            Err(TrackError::AlbumUrl(url.to_string()))
        }
        None if path.contains("/track/") => Err(TrackError::InvalidTrackId(url.to_string())),
        None => Err(TrackError::WrongService(url.to_string())),
    }
}
