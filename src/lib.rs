// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Track metadata extraction for Yandex Music links
//!
//! Pipeline: classify the link → cache lookup → resilient fetch →
//! cascade extraction (JSON-LD, Open Graph, HTML/CSS) → cache store.

pub mod cache;
pub mod cli;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod service;
pub mod track;

// Re-export main types
pub use cache::{CacheConfig, CacheStats, TrackCache};
pub use config::TrackInfoConfig;
pub use extractor::{CascadeExtractor, ExtractionStrategy, StrategyInfo};
pub use fetcher::{FetchConfig, PageFetcher, ResilientFetcher, RetryPolicy};
pub use service::{MessageHandler, Reply, TrackInfoService};
pub use track::{ErrorStage, TrackError, TrackId, TrackRecord, TrackUrl};
