// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Track duration formatting

use regex::Regex;
use std::sync::OnceLock;

use crate::track::TrackError;

fn iso_duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let num = r"(\d+(?:[.,]\d+)?)";
        Regex::new(&format!(
            r"^P(?:{n}W)?(?:{n}D)?(?:T(?:{n}H)?(?:{n}M)?(?:{n}S)?)?$",
            n = num
        ))
        .expect("ISO-8601 duration pattern is valid")
    })
}

/// Format whole seconds as `M:SS`, minutes may exceed 59
pub fn format_seconds(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Convert an ISO-8601 duration (e.g. `PT3M45S`) to `M:SS`
///
/// Weeks, days, hours, minutes and seconds are accepted, with optional
/// decimal fractions; fractional seconds are truncated. Calendar components
/// (years, months) have no fixed length and are rejected.
pub fn parse_iso_duration(iso: &str) -> Result<String, TrackError> {
    let iso = iso.trim();
    let invalid = || TrackError::InvalidDuration(iso.to_string());

    let caps = iso_duration_pattern().captures(iso).ok_or_else(invalid)?;

    const UNIT_SECONDS: [f64; 5] = [604_800.0, 86_400.0, 3_600.0, 60.0, 1.0];
    let mut total = 0.0_f64;
    let mut any_component = false;
    for (index, unit) in UNIT_SECONDS.iter().enumerate() {
        if let Some(m) = caps.get(index + 1) {
            let value: f64 = m.as_str().replace(',', ".").parse().map_err(|_| invalid())?;
            total += value * unit;
            any_component = true;
        }
    }

    // "P", "PT" and "P1DT" carry a designator with nothing after it
    let has_time_part = caps.get(3).is_some() || caps.get(4).is_some() || caps.get(5).is_some();
    if !any_component || (iso.contains('T') && !has_time_part) {
        return Err(invalid());
    }

    Ok(format_seconds(total.floor() as u64))
}
