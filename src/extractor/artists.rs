// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Artist line formatting from Schema.org `byArtist`

use serde_json::Value;

use crate::track::UNKNOWN_ARTIST;

/// Build an artist line from a `byArtist` value
///
/// Accepts a single artist object, a list of artist objects, or a bare
/// string. The first artist is primary and the rest are credited after
/// "feat.":
/// - `{"name": "Кино"}` → `Кино`
/// - two artists → `Miyagi feat. Эндшпиль`
/// - three or more → `DJ Snake feat. Lil Jon, Pitbull`
///
/// Anything without a usable name yields [`UNKNOWN_ARTIST`].
pub fn extract_artists(by_artist: &Value) -> String {
    let names: Vec<String> = match by_artist {
        Value::Object(_) => artist_name(by_artist).into_iter().collect(),
        Value::Array(items) => items.iter().filter_map(artist_name).collect(),
        Value::String(s) => Some(s.trim().to_string())
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
        _ => Vec::new(),
    };

    format_artist_names(&names)
}

/// Join artist names into "A", "A feat. B" or "A feat. B, C, ..."
pub fn format_artist_names(names: &[String]) -> String {
    match names {
        [] => UNKNOWN_ARTIST.to_string(),
        [only] => only.clone(),
        [primary, featured @ ..] => format!("{} feat. {}", primary, featured.join(", ")),
    }
}

fn artist_name(value: &Value) -> Option<String> {
    value
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
