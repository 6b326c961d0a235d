// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Track domain: records, cache keys, link validation and the error taxonomy

pub mod errors;
pub mod types;
pub mod validator;

pub use errors::{ErrorStage, TrackError};
pub use types::{TrackId, TrackRecord, UNKNOWN_ARTIST, UNKNOWN_DURATION};
pub use validator::{
    classify_track_url, looks_like_target_site, validate_message_text, TrackUrl,
    MAX_MESSAGE_LENGTH,
};
