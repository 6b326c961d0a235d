// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Open Graph strategy (priority 2)

use scraper::{Html, Selector};
use tracing::debug;

use super::duration::format_seconds;
use super::strategy::ExtractionStrategy;
use crate::track::{TrackError, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_DURATION};

/// Separators between track name and artist in `og:title`, tried in order
const TITLE_SEPARATORS: [&str; 3] = [" — ", " - ", " – "];

/// Link-preview meta tag extraction
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGraphStrategy;

impl OpenGraphStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Content of `<meta property="...">`, trimmed, or None when absent/blank
fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Split "Track — Artist" into its parts
///
/// Without a separator the whole title is the track name.
fn split_title(title: &str) -> (String, String) {
    for separator in TITLE_SEPARATORS {
        if let Some((track, artist)) = title.split_once(separator) {
            return (track.trim().to_string(), artist.trim().to_string());
        }
    }
    (title.trim().to_string(), UNKNOWN_ARTIST.to_string())
}

fn parse_duration(document: &Html) -> String {
    match meta_content(document, "music:duration") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seconds) => format_seconds(seconds),
            Err(_) => {
                debug!("Unparseable music:duration {:?}", raw);
                UNKNOWN_DURATION.to_string()
            }
        },
        None => UNKNOWN_DURATION.to_string(),
    }
}

impl ExtractionStrategy for OpenGraphStrategy {
    fn name(&self) -> &'static str {
        "Open Graph"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn applicable(&self, document: &Html) -> bool {
        Selector::parse(r#"meta[property="og:title"]"#)
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    }

    fn parse(&self, document: &Html, url: &str) -> Result<TrackRecord, TrackError> {
        let title = meta_content(document, "og:title")
            .ok_or_else(|| TrackError::MissingField("og:title".to_string()))?;

        let (track_name, mut artist) = split_title(&title);
        if track_name.is_empty() {
            return Err(TrackError::EmptyField("og:title".to_string()));
        }

        if let Some(dedicated) = meta_content(document, "og:audio:artist") {
            artist = dedicated;
        }

        let duration = parse_duration(document);
        let album = meta_content(document, "music:album");

        Ok(TrackRecord::new(track_name, artist, duration)
            .with_album(album)
            .with_url(url))
    }
}
