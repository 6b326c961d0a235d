// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching with retries and browser mimicry
//!
//! Each attempt sends a fresh set of browser-like headers through a client
//! that keeps cookies between calls. Transient failures (retryable statuses,
//! timeouts, connection/TLS/protocol errors) are retried with exponential
//! backoff and jitter; a numeric `Retry-After` on 429 replaces the next
//! backoff sleep.

use anyhow::Context;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::error::Error as StdError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::backoff::{backoff_delay, retry_after};
use super::config::{FetchConfig, RetryPolicy};
use super::headers::{browser_headers, pick_user_agent};
use super::provider::PageFetcher;
use crate::track::TrackError;

/// Outcome of a single attempt that did not produce a body
enum AttemptFailure {
    /// Retry allowed; `wait` overrides the regular backoff
    Retry { error: TrackError, wait: Option<Duration> },
    Terminal(TrackError),
}

/// Fetcher with retry/backoff, header rotation and a persistent cookie jar
pub struct ResilientFetcher {
    client: Client,
    config: FetchConfig,
    rng: Mutex<StdRng>,
    closed: AtomicBool,
}

impl ResilientFetcher {
    /// Create a fetcher seeded from OS entropy
    pub fn new(config: FetchConfig) -> anyhow::Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a fetcher with an explicit randomness source
    ///
    /// User-Agent choice and backoff jitter both draw from `rng`, so a seeded
    /// generator makes request headers and delays reproducible.
    pub fn with_rng(config: FetchConfig, rng: StdRng) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid fetch configuration")?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            rng: Mutex::new(rng),
            closed: AtomicBool::new(false),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Fetch a page, retrying per `policy`
    ///
    /// Attempts are numbered `1..=max_retries + 1`. Statuses outside
    /// `policy.retry_on_status` fail immediately.
    pub async fn fetch_with_policy(
        &self,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<String, TrackError> {
        if self.is_closed() {
            return Err(TrackError::ConnectionFailure("fetcher is closed".to_string()));
        }

        let total_attempts = policy.max_retries.saturating_add(1);
        let mut override_wait: Option<Duration> = None;

        for attempt in 1..=total_attempts {
            if attempt > 1 {
                let delay = match override_wait.take() {
                    Some(wait) => wait,
                    None => self.next_backoff(policy, attempt - 1),
                };
                info!(
                    "Retry {}/{} in {:.1}s for {}",
                    attempt - 1,
                    policy.max_retries,
                    delay.as_secs_f64(),
                    url
                );
                tokio::time::sleep(delay).await;
            }

            let retries_left = attempt < total_attempts;
            match self.attempt(url, policy, retries_left).await {
                Ok(body) => {
                    debug!("Fetched {} bytes from {} (attempt {})", body.len(), url, attempt);
                    return Ok(body);
                }
                Err(AttemptFailure::Retry { error, wait }) => {
                    warn!("Attempt {} for {} failed: {}", attempt, url, error);
                    override_wait = wait;
                }
                Err(AttemptFailure::Terminal(e)) => {
                    error!("Fetch failed for {}: {}", url, e);
                    return Err(e);
                }
            }
        }

        // The last attempt always reports Terminal, so the loop returns above
        Err(TrackError::Unexpected(format!(
            "retry loop exhausted without a result for {}",
            url
        )))
    }

    async fn attempt(
        &self,
        url: &str,
        policy: &RetryPolicy,
        retries_left: bool,
    ) -> Result<String, AttemptFailure> {
        let transient = |error: TrackError| {
            if retries_left {
                AttemptFailure::Retry { error, wait: None }
            } else {
                AttemptFailure::Terminal(error)
            }
        };

        let response = self
            .client
            .get(url)
            .headers(self.next_headers())
            .send()
            .await
            .map_err(|e| transient(classify_transport_error(&e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| transient(classify_transport_error(&e)));
        }

        let code = status.as_u16();
        if retries_left && policy.should_retry_status(code) {
            let wait = if code == 429 {
                retry_after(response.headers(), policy.max_delay)
            } else {
                None
            };
            if let Some(wait) = wait {
                warn!("HTTP 429 for {}, Retry-After {:.1}s", url, wait.as_secs_f64());
            }
            return Err(AttemptFailure::Retry {
                error: TrackError::from_status(code),
                wait,
            });
        }

        Err(AttemptFailure::Terminal(TrackError::from_status(code)))
    }

    fn next_headers(&self) -> HeaderMap {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        browser_headers(pick_user_agent(&mut *rng))
    }

    fn next_backoff(&self, policy: &RetryPolicy, retry: u32) -> Duration {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        backoff_delay(policy, retry, &mut *rng)
    }
}

#[async_trait]
impl PageFetcher for ResilientFetcher {
    async fn fetch(&self, url: &str) -> Result<String, TrackError> {
        self.fetch_with_policy(url, &self.config.retry).await
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("Page fetcher closed");
        }
    }
}

/// Map a transport-level reqwest error to a network error kind
pub fn classify_transport_error(error: &reqwest::Error) -> TrackError {
    let detail = error_chain(error);
    let lower = detail.to_lowercase();

    if error.is_timeout() {
        if error.is_connect() {
            TrackError::ConnectTimeout(detail)
        } else {
            TrackError::ReadTimeout(detail)
        }
    } else if ["certificate", "tls", "ssl", "handshake"]
        .iter()
        .any(|marker| lower.contains(marker))
    {
        TrackError::TlsFailure(detail)
    } else if error.is_connect() {
        TrackError::ConnectionFailure(detail)
    } else {
        TrackError::ProtocolFailure(detail)
    }
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
