// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Track metadata extraction from page HTML
//!
//! Three independent strategies of decreasing reliability:
//! 1. `JSON-LD` - Schema.org `MusicRecording` blocks
//! 2. `Open Graph` - link-preview meta tags
//! 3. `HTML/CSS` - structural selectors from known page layouts
//!
//! [`CascadeExtractor`] tries them in that order and returns the first record.
//! A strategy that declines or panics never stops the cascade.

pub mod artists;
pub mod cascade;
pub mod duration;
pub mod html_css;
pub mod json_ld;
pub mod open_graph;
pub mod strategy;

pub use artists::{extract_artists, format_artist_names};
pub use cascade::CascadeExtractor;
pub use duration::{format_seconds, parse_iso_duration};
pub use html_css::HtmlCssStrategy;
pub use json_ld::JsonLdStrategy;
pub use open_graph::OpenGraphStrategy;
pub use strategy::{ExtractionStrategy, StrategyInfo};
