// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! TTL + LRU cache of extracted track records
//!
//! Keyed by [`TrackId`] (`albumId:trackId`). An entry is invisible once its
//! TTL has elapsed; at capacity, expired entries are purged first and then
//! the least recently used entry is evicted.

pub mod config;

use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub use config::CacheConfig;

use crate::track::{TrackId, TrackRecord};

struct CachedTrack {
    record: TrackRecord,
    inserted_at: Instant,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStats {
    /// Live entries (expired entries drop out once observed)
    pub size: usize,
    /// Maximum cache capacity
    pub maxsize: usize,
    pub ttl: Duration,
    pub hits: u64,
    pub misses: u64,
    /// Hit percentage (0.0 when there were no lookups)
    pub hit_rate: f64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} entries, {} hits, {} misses, hit rate {:.1}%",
            self.size, self.maxsize, self.hits, self.misses, self.hit_rate
        )
    }
}

/// Bounded, time-expiring store of track records
pub struct TrackCache {
    entries: Mutex<LruCache<TrackId, CachedTrack>>,
    max_entries: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TrackCache {
    /// Create a new track cache
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries (0 is raised to 1)
    /// * `ttl` - Time-to-live for each entry
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            max_entries: capacity.get(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.ttl)
    }

    /// Get a live record, counting a hit or miss
    ///
    /// An expired entry is removed and reported as a miss.
    pub fn get(&self, key: &TrackId) -> Option<TrackRecord> {
        let found = self.lookup(key);
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit: {}", key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    fn lookup(&self, key: &TrackId) -> Option<TrackRecord> {
        let mut entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() < self.ttl {
            return Some(entry.record.clone());
        }
        entries.pop(key);
        debug!("Cache entry expired: {}", key);
        None
    }

    /// Store a record under `key`, replacing any previous entry
    pub fn put(&self, key: TrackId, record: TrackRecord) {
        let mut entries = match self.entries.lock() {
            Ok(e) => e,
            Err(_) => return,
        };

        if entries.len() >= self.max_entries && !entries.contains(&key) {
            Self::purge_expired(&mut entries, self.ttl);
        }

        debug!("Caching track {}: {}", key, record.name);
        if let Some((evicted, _)) = entries.push(
            key.clone(),
            CachedTrack {
                record,
                inserted_at: Instant::now(),
            },
        ) {
            if evicted != key {
                debug!("Evicted least recently used entry: {}", evicted);
            }
        }
    }

    /// Remove every entry (statistics are kept)
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            let removed = entries.len();
            entries.clear();
            info!("Track cache cleared ({} entries removed)", removed);
        }
    }

    /// Zero the hit and miss counters
    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        info!("Track cache statistics reset");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let size = self.entries.lock().map(|e| e.len()).unwrap_or(0);
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        let hit_rate = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64 * 100.0
        };

        CacheStats {
            size,
            maxsize: self.max_entries,
            ttl: self.ttl,
            hits,
            misses,
            hit_rate,
        }
    }

    fn purge_expired(entries: &mut LruCache<TrackId, CachedTrack>, ttl: Duration) {
        let expired: Vec<TrackId> = entries
            .iter()
            .filter(|(_, entry)| entry.inserted_at.elapsed() >= ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        if !expired.is_empty() {
            debug!("Purged {} expired cache entries", expired.len());
        }
    }
}
