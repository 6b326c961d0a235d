//! Page fetching for track lookups
//!
//! Retrieves track pages while looking like ordinary browser traffic.
//!
//! ## Architecture
//!
//! ```text
//! URL → ResilientFetcher ──(attempt n)──→ GET with rotated headers + cookie jar
//!            ↑                                   │
//!            └──── backoff / Retry-After ←── retryable status or transport error
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let fetcher = ResilientFetcher::new(FetchConfig::default())?;
//! let html = fetcher.fetch("https://music.yandex.ru/album/1/track/2").await?;
//! ```

pub mod backoff;
pub mod client;
pub mod config;
pub mod headers;
pub mod provider;

pub use client::{classify_transport_error, ResilientFetcher};
pub use config::{FetchConfig, RetryPolicy, DEFAULT_RETRY_STATUSES};
pub use provider::PageFetcher;

#[cfg(test)]
pub use provider::MockPageFetcher;
