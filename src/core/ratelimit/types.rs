//! Rate limiting types and data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limit policy, immutable and supplied by the caller
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests admitted per window
    pub max_requests: u32,
    /// Length of the sliding window
    pub window: Duration,
    /// Lockout imposed once the limit is exceeded
    pub cooldown: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
            cooldown: Duration::from_secs(30),
        }
    }
}

/// Persisted per-key limiter state
///
/// `timestamps` holds the instants of admitted requests still inside the
/// window as of the last prune; `blocked_until` marks the end of an active
/// cooldown. Mutated only by [`RateLimiter::check_and_record`](super::RateLimiter::check_and_record).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateLimitState {
    /// Admission instants, oldest first
    #[serde(default)]
    pub timestamps: Vec<DateTime<Utc>>,
    /// End of the active cooldown, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_until: Option<DateTime<Utc>>,
}

/// Verdict returned for a single request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResult {
    /// Whether the request is admitted
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining_requests: u32,
    /// How long to wait before retrying, when denied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_ms: Option<u64>,
}

impl RateLimitResult {
    pub(super) fn admit(remaining_requests: u32) -> Self {
        Self {
            allowed: true,
            remaining_requests,
            retry_after_ms: None,
        }
    }

    pub(super) fn deny(retry_after_ms: Option<u64>) -> Self {
        Self {
            allowed: false,
            remaining_requests: 0,
            retry_after_ms,
        }
    }
}
