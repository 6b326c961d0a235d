// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extraction strategy trait definition

use scraper::Html;

use crate::track::{TrackError, TrackRecord};

/// Trait for implementing page extraction strategies
///
/// Strategies are independent: each looks at one kind of data on the page
/// and either produces a full record or declines. The cascade tries them in
/// priority order and stops at the first record.
pub trait ExtractionStrategy: Send + Sync {
    /// Strategy name for logging
    fn name(&self) -> &'static str;

    /// Dispatch priority (lower = tried first)
    fn priority(&self) -> u8;

    /// Cheap structural probe run before [`parse`](Self::parse)
    ///
    /// Default is `true` (always attempt).
    fn applicable(&self, _document: &Html) -> bool {
        true
    }

    /// Extract a record from the page
    ///
    /// # Returns
    /// The record, or a parsing error describing why the strategy declined
    fn parse(&self, document: &Html, url: &str) -> Result<TrackRecord, TrackError>;
}

/// Name and priority of a registered strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyInfo {
    pub name: &'static str,
    pub priority: u8,
}
