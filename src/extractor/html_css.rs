// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structural selector strategy (priority 3, last resort)
//!
//! Tries CSS selectors from known historical page layouts. These break
//! whenever the site is redesigned, which is why this strategy runs last.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::strategy::ExtractionStrategy;
use crate::track::{TrackError, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_DURATION};

const TRACK_NAME_SELECTORS: &[&str] = &[
    "h1.track__title",
    ".d-track__title",
    r#"[data-testid="track-title"]"#,
    ".track-heading__title",
    "h1.page-track__title",
];

const ARTIST_SELECTORS: &[&str] = &[
    ".d-track__artists a",
    ".track__artists a",
    r#"[data-testid="track-artist"]"#,
    ".page-track__artists a",
    "a.deco-link.track__artists-item",
];

const DURATION_SELECTORS: &[&str] = &[
    ".d-track__duration",
    ".track__duration",
    r#"[data-testid="track-duration"]"#,
    ".page-track__duration",
];

const ALBUM_SELECTORS: &[&str] = &[
    ".d-track__album a",
    ".track__album a",
    r#"[data-testid="track-album"]"#,
];

/// CSS-selector extraction over the rendered page layout
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlCssStrategy;

impl HtmlCssStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// Element text with whitespace runs collapsed
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text found by trying selectors in order
fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            debug!("Skipping invalid selector '{}'", selector_str);
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Non-empty texts of every element matched by the first selector that matches anything
fn all_texts(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector_str in selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            debug!("Skipping invalid selector '{}'", selector_str);
            continue;
        };
        let elements: Vec<ElementRef> = document.select(&selector).collect();
        if !elements.is_empty() {
            return elements
                .iter()
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect();
        }
    }
    Vec::new()
}

impl ExtractionStrategy for HtmlCssStrategy {
    fn name(&self) -> &'static str {
        "HTML/CSS"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn parse(&self, document: &Html, url: &str) -> Result<TrackRecord, TrackError> {
        let track_name = first_text(document, TRACK_NAME_SELECTORS)
            .ok_or_else(|| TrackError::MissingField("track title".to_string()))?;

        let artists = all_texts(document, ARTIST_SELECTORS);
        let artist = if artists.is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            artists.join(", ")
        };

        let duration =
            first_text(document, DURATION_SELECTORS).unwrap_or_else(|| UNKNOWN_DURATION.to_string());
        let album = first_text(document, ALBUM_SELECTORS);

        Ok(TrackRecord::new(track_name, artist, duration)
            .with_album(album)
            .with_url(url))
    }
}
