// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cascade dispatcher over extraction strategies

use scraper::Html;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, info, warn};

use super::html_css::HtmlCssStrategy;
use super::json_ld::JsonLdStrategy;
use super::open_graph::OpenGraphStrategy;
use super::strategy::{ExtractionStrategy, StrategyInfo};
use crate::track::{TrackError, TrackRecord};

/// Runs extraction strategies in priority order until one produces a record
pub struct CascadeExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Default for CascadeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeExtractor {
    /// Create a cascade with the default strategies:
    /// JSON-LD (1), Open Graph (2), HTML/CSS (3)
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(JsonLdStrategy::new()),
            Box::new(OpenGraphStrategy::new()),
            Box::new(HtmlCssStrategy::new()),
        ])
    }

    /// Create a cascade from custom strategies
    pub fn with_strategies(mut strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        // Sort by priority (lower = tried first), stable for equal priorities
        strategies.sort_by_key(|s| s.priority());
        debug!(
            "Cascade initialized with strategies: {:?}",
            strategies.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Self { strategies }
    }

    /// Extract a track record from page HTML
    ///
    /// # Arguments
    /// * `html` - Raw page HTML
    /// * `url` - Source URL, recorded in the result
    ///
    /// # Returns
    /// The first strategy's record, or `AllStrategiesFailed`
    pub fn extract(&self, html: &str, url: &str) -> Result<TrackRecord, TrackError> {
        let document = Html::parse_document(html);

        for strategy in &self.strategies {
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                if !strategy.applicable(&document) {
                    return None;
                }
                Some(strategy.parse(&document, url))
            }));

            match outcome {
                Ok(None) => {
                    debug!("Strategy {} not applicable for {}", strategy.name(), url);
                }
                Ok(Some(Ok(record))) => {
                    info!("Strategy {} extracted track: {}", strategy.name(), record.name);
                    return Ok(record);
                }
                Ok(Some(Err(reason))) => {
                    debug!("Strategy {} declined: {}, trying next", strategy.name(), reason);
                }
                Err(payload) => {
                    warn!(
                        "Strategy {} panicked: {}, trying next",
                        strategy.name(),
                        panic_message(payload.as_ref())
                    );
                }
            }
        }

        warn!("All extraction strategies failed for {}", url);
        Err(TrackError::AllStrategiesFailed)
    }

    /// Registered strategies in dispatch order
    pub fn strategies(&self) -> Vec<StrategyInfo> {
        self.strategies
            .iter()
            .map(|s| StrategyInfo {
                name: s.name(),
                priority: s.priority(),
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
