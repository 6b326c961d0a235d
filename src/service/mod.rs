// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Track info service orchestration
//!
//! Coordinates the page fetcher, the extraction cascade and the result cache.

pub mod handler;

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub use handler::{MessageHandler, Reply};

use crate::cache::{CacheConfig, CacheStats, TrackCache};
use crate::config::TrackInfoConfig;
use crate::extractor::{CascadeExtractor, StrategyInfo};
use crate::fetcher::{PageFetcher, ResilientFetcher};
use crate::track::{TrackError, TrackId, TrackRecord};

/// Main service: cache lookup → fetch → extract → cache store
pub struct TrackInfoService {
    fetcher: Arc<dyn PageFetcher>,
    extractor: CascadeExtractor,
    cache: TrackCache,
}

impl TrackInfoService {
    /// Create a service backed by a [`ResilientFetcher`]
    pub fn new(config: TrackInfoConfig) -> anyhow::Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;
        let fetcher = ResilientFetcher::new(config.fetch)?;
        Ok(Self::with_fetcher(Arc::new(fetcher), &config.cache))
    }

    /// Create a service with a custom fetcher
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, cache: &CacheConfig) -> Self {
        let extractor = CascadeExtractor::new();
        debug!(
            "Track info service created (cache {} entries, ttl {}s)",
            cache.max_entries,
            cache.ttl.as_secs()
        );
        Self {
            fetcher,
            extractor,
            cache: TrackCache::from_config(cache),
        }
    }

    /// Get track metadata for a page URL
    ///
    /// # Arguments
    /// * `url` - Track page URL (already classified by the caller)
    /// * `cache_key` - Key to read and store the result under; `None` bypasses the cache
    ///
    /// # Returns
    /// The extracted record, or the fetch/parsing error
    pub async fn get_track_info(
        &self,
        url: &str,
        cache_key: Option<&TrackId>,
    ) -> Result<TrackRecord, TrackError> {
        if let Some(key) = cache_key {
            if let Some(record) = self.cache.get(key) {
                info!("Returning cached track {} for {}", key, url);
                return Ok(record);
            }
        }

        let start = Instant::now();
        let html = self.fetcher.fetch(url).await?;

        let record = self.extractor.extract(&html, url).map_err(|e| {
            error!("Could not extract track from {}: {}", url, e);
            e
        })?;

        if let Some(key) = cache_key {
            self.cache.put(key.clone(), record.clone());
        }

        info!(
            "Track lookup complete: {} in {}ms",
            record,
            start.elapsed().as_millis()
        );
        Ok(record)
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Clear the result cache
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Registered extraction strategies in dispatch order
    pub fn strategies(&self) -> Vec<StrategyInfo> {
        self.extractor.strategies()
    }

    /// Log final statistics and release the fetcher
    pub async fn close(self) {
        info!("Shutting down track info service: cache {}", self.cache.stats());
        self.fetcher.close().await;
    }
}
