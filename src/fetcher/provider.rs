// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetcher trait definition

use async_trait::async_trait;

use crate::track::TrackError;

/// Trait for anything that can turn a page URL into its HTML
///
/// The orchestrator only depends on this seam, so transports can be swapped
/// (and mocked in tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body as text
    ///
    /// # Returns
    /// The body, or a terminal HTTP/network error once retries are spent
    async fn fetch(&self, url: &str) -> Result<String, TrackError>;

    /// Release transport resources; later fetches may fail
    async fn close(&self) {}
}
