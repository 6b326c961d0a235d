// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error taxonomy for track lookups
//!
//! One flat enum covers every failure a lookup can end with, grouped by the
//! stage that raises it:
//! - Validation of the incoming text and URL
//! - HTTP status failures (carrying the numeric status)
//! - Network/transport failures
//! - Parsing failures of the fetched page

use thiserror::Error;

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Validation,
    Http,
    Network,
    Parsing,
    Unexpected,
}

/// Errors that can end a track lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    // Validation
    #[error("Empty message")]
    EmptyInput,

    #[error("Message too long: {length} chars (limit {limit})")]
    TooLong { length: usize, limit: usize },

    #[error("Not a URL: {0}")]
    NotAUrl(String),

    #[error("Wrong domain: {0}")]
    WrongDomain(String),

    #[error("Not a Yandex Music track: {0}")]
    WrongService(String),

    #[error("Album URL: {0}")]
    AlbumUrl(String),

    #[error("Artist URL: {0}")]
    ArtistUrl(String),

    #[error("Playlist URL: {0}")]
    PlaylistUrl(String),

    #[error("Invalid track ID in URL: {0}")]
    InvalidTrackId(String),

    // HTTP
    #[error("HTTP {status}: bad request")]
    BadRequest { status: u16 },

    #[error("HTTP {status}: forbidden")]
    Forbidden { status: u16 },

    #[error("HTTP {status}: not found")]
    NotFound { status: u16 },

    #[error("HTTP {status}: gone")]
    Gone { status: u16 },

    #[error("HTTP {status}: rate limited")]
    RateLimited { status: u16 },

    #[error("HTTP {status}: server error")]
    ServerError { status: u16 },

    #[error("HTTP {status}: bad gateway")]
    BadGateway { status: u16 },

    #[error("HTTP {status}: service unavailable")]
    Unavailable { status: u16 },

    #[error("HTTP {status}: gateway timeout")]
    GatewayTimeout { status: u16 },

    // Network
    #[error("Connect timeout: {0}")]
    ConnectTimeout(String),

    #[error("Read timeout: {0}")]
    ReadTimeout(String),

    #[error("Connection failed: {0}")]
    ConnectionFailure(String),

    #[error("TLS failure: {0}")]
    TlsFailure(String),

    #[error("Protocol failure: {0}")]
    ProtocolFailure(String),

    // Parsing
    #[error("No structured data block found")]
    StructuredDataMissing,

    #[error("Malformed structured data: {0}")]
    MalformedData(String),

    #[error("Unexpected schema type: {0}")]
    WrongSchemaType(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid type for {field}: expected {expected}")]
    InvalidFieldType { field: String, expected: String },

    #[error("Empty field: {0}")]
    EmptyField(String),

    #[error("Invalid duration format: {0}")]
    InvalidDuration(String),

    #[error("All extraction strategies failed")]
    AllStrategiesFailed,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl TrackError {
    /// Map a non-success HTTP status to its error kind
    ///
    /// Statuses without a dedicated kind are reported as `ServerError`.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => TrackError::BadRequest { status },
            403 => TrackError::Forbidden { status },
            404 => TrackError::NotFound { status },
            410 => TrackError::Gone { status },
            429 => TrackError::RateLimited { status },
            500 => TrackError::ServerError { status },
            502 => TrackError::BadGateway { status },
            503 => TrackError::Unavailable { status },
            504 => TrackError::GatewayTimeout { status },
            _ => TrackError::ServerError { status },
        }
    }

    pub fn stage(&self) -> ErrorStage {
        use TrackError::*;
        match self {
            EmptyInput | TooLong { .. } | NotAUrl(_) | WrongDomain(_) | WrongService(_)
            | AlbumUrl(_) | ArtistUrl(_) | PlaylistUrl(_) | InvalidTrackId(_) => {
                ErrorStage::Validation
            }
            BadRequest { .. }
            | Forbidden { .. }
            | NotFound { .. }
            | Gone { .. }
            | RateLimited { .. }
            | ServerError { .. }
            | BadGateway { .. }
            | Unavailable { .. }
            | GatewayTimeout { .. } => ErrorStage::Http,
            ConnectTimeout(_) | ReadTimeout(_) | ConnectionFailure(_) | TlsFailure(_)
            | ProtocolFailure(_) => ErrorStage::Network,
            StructuredDataMissing
            | MalformedData(_)
            | WrongSchemaType(_)
            | MissingField(_)
            | InvalidFieldType { .. }
            | EmptyField(_)
            | InvalidDuration(_)
            | AllStrategiesFailed => ErrorStage::Parsing,
            Unexpected(_) => ErrorStage::Unexpected,
        }
    }

    /// HTTP status carried by HTTP-stage errors
    pub fn status_code(&self) -> Option<u16> {
        use TrackError::*;
        match self {
            BadRequest { status }
            | Forbidden { status }
            | NotFound { status }
            | Gone { status }
            | RateLimited { status }
            | ServerError { status }
            | BadGateway { status }
            | Unavailable { status }
            | GatewayTimeout { status } => Some(*status),
            _ => None,
        }
    }

    /// Fixed text shown to the chat user for this kind of failure
    pub fn user_message(&self) -> &'static str {
        use TrackError::*;
        match self {
            EmptyInput => "❌ Send me a link to a track",
            TooLong { .. } => "❌ The message is too long",
            NotAUrl(_) => "❌ That does not look like a link. Send a Yandex Music track link",
            WrongDomain(_) => {
                "❌ I only work with Yandex Music. Send a link like:\n\
                 https://music.yandex.ru/album/.../track/..."
            }
            WrongService(_) => {
                "❌ This is not Yandex Music. I need a link like:\n\
                 https://music.yandex.ru/album/.../track/..."
            }
            AlbumUrl(_) => {
                "❌ This is an album link, not a track.\n\
                 Open a specific track and copy its link"
            }
            ArtistUrl(_) => "❌ This is an artist link. I need a link to a specific track",
            PlaylistUrl(_) => "❌ This is a playlist link. Send a link to a specific track",
            InvalidTrackId(_) => "❌ Invalid link format. Album and track IDs must be numbers",

            BadRequest { .. } => "⚠️ Yandex Music rejected the request",
            Forbidden { .. } => "🔒 Access to this track is restricted (possibly geo-blocked)",
            NotFound { .. } => "❌ Track not found. It may have been removed or the link is wrong",
            Gone { .. } => "❌ This track has been removed from Yandex Music",
            RateLimited { .. } => "⏳ Too many requests. Wait a minute and try again",
            ServerError { .. } => "⚠️ Yandex Music server error. Try again later",
            BadGateway { .. } | Unavailable { .. } => {
                "⚠️ Yandex Music is temporarily unavailable. Try again in a couple of minutes"
            }
            GatewayTimeout { .. } => "⚠️ Yandex Music is not responding. Try again later",

            ConnectTimeout(_) => "⏱️ Could not connect to Yandex Music. Check that the service is up",
            ReadTimeout(_) => "⏱️ Yandex Music is taking too long to respond. Try again",
            ConnectionFailure(_) => "⚠️ Could not reach the Yandex Music server",
            TlsFailure(_) => "🔐 Secure connection failed. Try again later",
            ProtocolFailure(_) => "⚠️ The connection was interrupted. Try again",

            StructuredDataMissing => {
                "⚠️ Could not find track data on the page. \
                 Yandex may have changed the site layout"
            }
            MalformedData(_) => "⚠️ Could not read the track data. Try another track",
            WrongSchemaType(_) => "⚠️ The page does not describe a track",
            MissingField(_) => "⚠️ Could not get complete track data",
            InvalidFieldType { .. } => "⚠️ Received invalid track data",
            EmptyField(_) => "⚠️ Received empty track data",
            InvalidDuration(_) => "⚠️ Could not determine the track duration",
            AllStrategiesFailed => "⚠️ Could not extract track information from the page",

            Unexpected(_) => "⚠️ Something went wrong. Try again later",
        }
    }
}
