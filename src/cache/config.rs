//! Track cache configuration

use std::time::Duration;

/// Configuration for the track result cache
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum live entries
    pub max_entries: usize,
    /// Time-to-live for each entry, measured from insertion
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl CacheConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("max_entries must be > 0".to_string());
        }
        Ok(())
    }
}
