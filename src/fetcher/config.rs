//! Configuration for page fetching
//!
//! Defines the HTTP client settings and the retry/backoff policy.

use std::time::Duration;

/// Statuses retried by default
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Retry and backoff policy for a single fetch
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (default: 2)
    pub max_retries: u32,
    /// Backoff before the first retry (default: 1s)
    pub initial_delay: Duration,
    /// Upper bound for any single sleep (default: 60s)
    pub max_delay: Duration,
    /// Backoff growth factor (default: 2.0)
    pub multiplier: f64,
    /// Relative jitter, delay is perturbed by ±jitter*delay (default: 0.1)
    pub jitter: f64,
    /// Statuses that trigger a retry
    pub retry_on_status: Vec<u16>,
}

impl RetryPolicy {
    pub fn should_retry_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Validate policy values
    pub fn validate(&self) -> Result<(), String> {
        if self.multiplier < 1.0 {
            return Err("multiplier must be at least 1.0".to_string());
        }
        if !(0.0..=1.0).contains(&self.jitter) {
            return Err("jitter must be within [0, 1]".to_string());
        }
        if self.initial_delay > self.max_delay {
            return Err("initial_delay must not exceed max_delay".to_string());
        }
        Ok(())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            multiplier: 2.0,
            jitter: 0.1,
            retry_on_status: DEFAULT_RETRY_STATUSES.to_vec(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Total timeout per request (default: 10s)
    pub timeout: Duration,
    /// Connect timeout per request (default: 10s)
    pub connect_timeout: Duration,
    /// Maximum redirects followed (default: 10)
    pub max_redirects: usize,
    pub retry: RetryPolicy,
}

impl FetchConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("timeout must be greater than 0".to_string());
        }
        if self.connect_timeout.is_zero() {
            return Err("connect_timeout must be greater than 0".to_string());
        }
        self.retry.validate()
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            max_redirects: 10,
            retry: RetryPolicy::default(),
        }
    }
}
