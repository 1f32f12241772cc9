//! Sliding-window rate limiting with a cooldown lock
//!
//! Requests are counted against a true sliding window (only calls within the
//! last `window` count), and a violation imposes a cooldown during which every
//! request is rejected regardless of window state. State lives in an injected
//! [`KeyValueStore`](crate::storage::KeyValueStore), keyed per client.

mod limiter;
mod types;

#[cfg(test)]
mod tests;

pub use limiter::RateLimiter;
pub use types::{RateLimitConfig, RateLimitResult, RateLimitState};
