// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for track lookups

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::fetcher::FetchConfig;

/// Top-level configuration for the track info service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackInfoConfig {
    /// Page fetching (timeouts, redirects, retry policy)
    pub fetch: FetchConfig,
    /// Result cache sizing
    pub cache: CacheConfig,
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl TrackInfoConfig {
    /// Load configuration from environment variables
    ///
    /// Absent or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = env_parse::<u64>("TRACK_FETCH_TIMEOUT_SECS") {
            config.fetch.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = env_parse::<u32>("TRACK_FETCH_MAX_RETRIES") {
            config.fetch.retry.max_retries = retries;
        }
        if let Some(ms) = env_parse::<u64>("TRACK_RETRY_INITIAL_DELAY_MS") {
            config.fetch.retry.initial_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = env_parse::<u64>("TRACK_RETRY_MAX_DELAY_MS") {
            config.fetch.retry.max_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = env_parse::<u64>("TRACK_CACHE_TTL_SECS") {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(entries) = env_parse::<usize>("TRACK_CACHE_MAX_ENTRIES") {
            config.cache.max_entries = entries;
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.fetch.validate()?;
        self.cache.validate()
    }
}
