//! Request and response types crossing the gateway boundary

use crate::core::ratelimit::RateLimitResult;
use serde::{Deserialize, Serialize};

/// A chat submission entering the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Raw user text
    pub message: String,
    /// Opaque caller-supplied conversation context
    #[serde(default)]
    pub context: String,
    /// Base instruction text; server-configured, never client-supplied
    #[serde(default)]
    pub system_prompt: String,
}

/// Machine-readable failure class surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Too many requests in the window; retry after the reported delay
    RateLimit,
    /// Input rejected before reaching the model
    Blocked,
    /// Backend failure or timeout; safe to retry
    ServiceError,
}

/// Outcome returned for every chat submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Whether the advisor produced a reply
    pub success: bool,
    /// Advisor text on success, a generic notice otherwise
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_info: Option<RateLimitResult>,
}
