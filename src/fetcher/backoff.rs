// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Exponential backoff with jitter, and `Retry-After` parsing

use rand::Rng;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

use super::config::RetryPolicy;

/// Delay before the given retry attempt (1-based)
///
/// `min(max_delay, initial_delay * multiplier^(attempt-1))`, perturbed by
/// uniform jitter of ±`jitter * delay` and floored at zero.
pub fn backoff_delay<R: Rng + ?Sized>(policy: &RetryPolicy, attempt: u32, rng: &mut R) -> Duration {
    let exponent = attempt.saturating_sub(1) as i32;
    let base = policy.initial_delay.as_secs_f64() * policy.multiplier.powi(exponent);
    let delay = base.min(policy.max_delay.as_secs_f64());

    let spread = delay * policy.jitter;
    let jittered = if spread > 0.0 {
        delay + rng.gen_range(-spread..=spread)
    } else {
        delay
    };

    Duration::from_secs_f64(jittered.max(0.0))
}

/// Numeric `Retry-After` value, capped at the policy's max delay
///
/// HTTP-date values are not supported and yield `None`.
pub fn retry_after(headers: &HeaderMap, max_delay: Duration) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    let secs: f64 = value.parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    let wait = Duration::try_from_secs_f64(secs).unwrap_or(max_delay);
    Some(wait.min(max_delay))
}
