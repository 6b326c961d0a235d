// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Front-end adapter: free text in, reply out
//!
//! Gate order: message checks → cheap host pre-filter → full link
//! classification → service lookup. Text that does not look like a music
//! link at all is ignored rather than reported as an error.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::TrackInfoService;
use crate::track::{
    classify_track_url, looks_like_target_site, validate_message_text, ErrorStage, TrackError,
    TrackRecord,
};

/// Outcome of handling one incoming message
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Not a music link; the caller should stay silent
    NotRecognized,
    Track(TrackRecord),
    Failed(TrackError),
}

/// Turns incoming chat messages into track lookups
#[derive(Clone)]
pub struct MessageHandler {
    service: Arc<TrackInfoService>,
}

impl MessageHandler {
    pub fn new(service: Arc<TrackInfoService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<TrackInfoService> {
        &self.service
    }

    /// Handle one message
    pub async fn handle(&self, text: &str) -> Reply {
        let outcome = AssertUnwindSafe(self.lookup(text)).catch_unwind().await;

        match outcome {
            Ok(Ok(Some(record))) => Reply::Track(record),
            Ok(Ok(None)) => Reply::NotRecognized,
            Ok(Err(e)) => {
                log_failure(&e);
                Reply::Failed(e)
            }
            Err(_) => {
                let e = TrackError::Unexpected("track lookup panicked".to_string());
                log_failure(&e);
                Reply::Failed(e)
            }
        }
    }

    async fn lookup(&self, text: &str) -> Result<Option<TrackRecord>, TrackError> {
        let url = validate_message_text(text)?;
        if !looks_like_target_site(&url) {
            debug!("Ignoring message that is not a music link");
            return Ok(None);
        }

        let track = classify_track_url(&url)?;
        let key = track.cache_key();
        debug!("Looking up track {}", key);
        self.service.get_track_info(&url, Some(&key)).await.map(Some)
    }
}

fn log_failure(e: &TrackError) {
    match e.stage() {
        ErrorStage::Validation => debug!("Rejected message: {}", e),
        ErrorStage::Http => info!("HTTP error during lookup: {}", e),
        ErrorStage::Network => warn!("Network error during lookup: {}", e),
        ErrorStage::Parsing => error!("Parsing error during lookup: {}", e),
        ErrorStage::Unexpected => error!("Unexpected error during lookup: {}", e),
    }
}
