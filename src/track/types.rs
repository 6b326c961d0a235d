// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for track metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Artist placeholder used when the page carries no artist data
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Duration placeholder used when the page carries no usable duration
pub const UNKNOWN_DURATION: &str = "—";

/// Metadata of a single track, as extracted from its page
///
/// A plain value: the fields are public for reading, and every holder owns
/// its own copy. The cache hands out clones, so editing a returned record
/// never changes what later lookups see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// Track title (never empty)
    pub name: String,
    /// Artist line, e.g. "A feat. B, C" (never empty)
    pub artist: String,
    /// `M:SS` with minutes allowed past 59, or [`UNKNOWN_DURATION`]
    pub duration: String,
    /// Album title if the page exposes one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Page the record was extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TrackRecord {
    /// Create a record, substituting placeholders for blank artist/duration
    pub fn new(
        name: impl Into<String>,
        artist: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        let artist = artist.into();
        let duration = duration.into();
        Self {
            name: name.into(),
            artist: if artist.trim().is_empty() {
                UNKNOWN_ARTIST.to_string()
            } else {
                artist
            },
            duration: if duration.trim().is_empty() {
                UNKNOWN_DURATION.to_string()
            } else {
                duration
            },
            album: None,
            url: None,
        }
    }

    pub fn with_album(mut self, album: Option<String>) -> Self {
        self.album = album.filter(|a| !a.trim().is_empty());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn has_known_artist(&self) -> bool {
        self.artist != UNKNOWN_ARTIST
    }

    pub fn has_known_duration(&self) -> bool {
        self.duration != UNKNOWN_DURATION
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist, self.name, self.duration)
    }
}

/// Cache key of a track: `albumId:trackId`
///
/// Both halves are kept as the digit strings found in the URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(album_id: &str, track_id: &str) -> Self {
        Self(format!("{}:{}", album_id, track_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
