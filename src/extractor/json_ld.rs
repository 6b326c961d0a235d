// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Schema.org JSON-LD strategy (priority 1)
//!
//! Reads `<script type="application/ld+json">` blocks and looks for a
//! `MusicRecording` object. This is the most reliable source when present.

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

use super::artists::extract_artists;
use super::duration::parse_iso_duration;
use super::strategy::ExtractionStrategy;
use crate::track::{TrackError, TrackRecord, UNKNOWN_DURATION};

const LD_JSON_SELECTOR: &str = r#"script[type="application/ld+json"]"#;
const RECORDING_TYPE: &str = "MusicRecording";

/// Structured-data extraction from JSON-LD
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLdStrategy;

impl JsonLdStrategy {
    pub fn new() -> Self {
        Self
    }

    fn blocks(document: &Html) -> Vec<String> {
        let Ok(selector) = Selector::parse(LD_JSON_SELECTOR) else {
            return Vec::new();
        };
        document
            .select(&selector)
            .map(|script| script.text().collect::<String>())
            .filter(|text| !text.trim().is_empty())
            .collect()
    }
}

impl ExtractionStrategy for JsonLdStrategy {
    fn name(&self) -> &'static str {
        "JSON-LD"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn applicable(&self, document: &Html) -> bool {
        Selector::parse(LD_JSON_SELECTOR)
            .map(|selector| document.select(&selector).next().is_some())
            .unwrap_or(false)
    }

    fn parse(&self, document: &Html, url: &str) -> Result<TrackRecord, TrackError> {
        let blocks = Self::blocks(document);
        if blocks.is_empty() {
            return Err(TrackError::StructuredDataMissing);
        }

        let mut parsed_any = false;
        let mut last_parse_error = String::new();
        let mut seen_types = Vec::new();

        for block in &blocks {
            let value: Value = match serde_json::from_str(block.trim()) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Skipping invalid JSON-LD block: {}", e);
                    last_parse_error = e.to_string();
                    continue;
                }
            };
            parsed_any = true;

            if let Some(recording) = find_recording(&value) {
                return build_record(recording, url);
            }
            collect_types(&value, &mut seen_types);
        }

        if !parsed_any {
            return Err(TrackError::MalformedData(last_parse_error));
        }

        let found = if seen_types.is_empty() {
            "none".to_string()
        } else {
            seen_types.join(", ")
        };
        Err(TrackError::WrongSchemaType(found))
    }
}

fn is_recording(map: &Map<String, Value>) -> bool {
    match map.get("@type") {
        Some(Value::String(t)) => t == RECORDING_TYPE,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(RECORDING_TYPE)),
        _ => false,
    }
}

/// First `MusicRecording` object in a block (top level, list, or `@graph`)
fn find_recording(value: &Value) -> Option<&Map<String, Value>> {
    match value {
        Value::Object(map) if is_recording(map) => Some(map),
        Value::Object(map) => map.get("@graph").and_then(find_recording),
        Value::Array(items) => items.iter().find_map(find_recording),
        _ => None,
    }
}

fn collect_types(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(t) = map.get("@type") {
                out.push(match t {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
            }
            if let Some(graph) = map.get("@graph") {
                collect_types(graph, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_types(item, out)),
        _ => {}
    }
}

fn build_record(data: &Map<String, Value>, url: &str) -> Result<TrackRecord, TrackError> {
    let name = match data.get("name") {
        None | Some(Value::Null) => return Err(TrackError::MissingField("name".to_string())),
        Some(Value::String(name)) => name.trim(),
        Some(_) => {
            return Err(TrackError::InvalidFieldType {
                field: "name".to_string(),
                expected: "string".to_string(),
            })
        }
    };
    if name.is_empty() {
        return Err(TrackError::EmptyField("name".to_string()));
    }

    let artist = extract_artists(data.get("byArtist").unwrap_or(&Value::Null));

    let duration = match data.get("duration").and_then(Value::as_str) {
        Some(iso) => parse_iso_duration(iso).unwrap_or_else(|e| {
            debug!("{}", e);
            UNKNOWN_DURATION.to_string()
        }),
        None => UNKNOWN_DURATION.to_string(),
    };

    let album = match data.get("inAlbum") {
        Some(Value::Array(albums)) => albums.iter().find_map(album_name),
        Some(album) => album_name(album),
        None => None,
    };

    Ok(TrackRecord::new(name, artist, duration)
        .with_album(album)
        .with_url(url))
}

fn album_name(value: &Value) -> Option<String> {
    value
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
