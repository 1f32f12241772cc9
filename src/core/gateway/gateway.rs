//! Core ChatGateway implementation

use crate::core::audit::{AuditAction, AuditEntry, AuditLog};
use crate::core::providers::{LlmBackend, TrainingContextProvider};
use crate::core::ratelimit::{RateLimitConfig, RateLimiter};
use crate::core::sanitize::{BlockReason, InputSanitizer};
use crate::core::types::{ChatRequest, ChatResponse, ErrorCode};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Generic rejection text; never reveals why the message was blocked
const BLOCKED_MESSAGE: &str =
    "Sorry, I couldn't process that message. Please rephrase and try again.";

/// Generic infrastructure-failure text; never carries backend detail
const UNAVAILABLE_MESSAGE: &str =
    "The advisor is temporarily unavailable. Please try again in a moment.";

/// Longest internal error detail written to the audit trail
const ERROR_DETAIL_CHARS: usize = 200;

/// Gateway between end users and the advisor model
///
/// `handle` never returns an error: every branch maps to a [`ChatResponse`].
/// Only the remote call can raise, and it is caught here.
pub struct ChatGateway {
    limiter: RateLimiter,
    sanitizer: InputSanitizer,
    chat_log: AuditLog,
    security_log: AuditLog,
    backend: Arc<dyn LlmBackend>,
    context_provider: Arc<dyn TrainingContextProvider>,
    rate_limit: RateLimitConfig,
    call_timeout: Duration,
}

impl ChatGateway {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        limiter: RateLimiter,
        chat_log: AuditLog,
        security_log: AuditLog,
        backend: Arc<dyn LlmBackend>,
        context_provider: Arc<dyn TrainingContextProvider>,
        rate_limit: RateLimitConfig,
        call_timeout: Duration,
    ) -> Self {
        Self {
            limiter,
            sanitizer: InputSanitizer::new(),
            chat_log,
            security_log,
            backend,
            context_provider,
            rate_limit,
            call_timeout,
        }
    }

    /// Run one chat submission through the full pipeline
    pub async fn handle(&self, client_key: &str, request: ChatRequest) -> ChatResponse {
        let verdict = self
            .limiter
            .check_and_record(client_key, &self.rate_limit)
            .await;

        if !verdict.allowed {
            let message = match verdict.retry_after_ms {
                Some(ms) => {
                    let secs = ms.div_ceil(1000);
                    format!(
                        "You're sending messages too quickly. Please try again in {secs} seconds."
                    )
                }
                None => "You're sending messages too quickly. Please try again shortly."
                    .to_string(),
            };
            info!("Request throttled for client key");
            self.chat_log
                .append(AuditEntry::new(
                    AuditAction::RequestBlockedRateLimit,
                    "request rate limit exceeded",
                ))
                .await;
            return ChatResponse {
                success: false,
                message,
                error: Some(ErrorCode::RateLimit),
                rate_limit_info: Some(verdict),
            };
        }

        let sanitized = self.sanitizer.sanitize(&request.message);
        if sanitized.blocked {
            let reason = sanitized.reason.unwrap_or(BlockReason::InjectionDetected);
            if reason == BlockReason::InjectionDetected {
                warn!("Prompt injection attempt blocked");
                self.security_log
                    .append(
                        AuditEntry::new(
                            AuditAction::RequestBlockedSanitizer,
                            "prompt injection pattern detected",
                        )
                        .with_preview(&request.message),
                    )
                    .await;
            }
            self.chat_log
                .append(AuditEntry::new(
                    AuditAction::RequestBlockedSanitizer,
                    reason.to_string(),
                ))
                .await;
            return ChatResponse {
                success: false,
                message: BLOCKED_MESSAGE.to_string(),
                error: Some(ErrorCode::Blocked),
                rate_limit_info: None,
            };
        }

        let training = self.context_provider.training_context().await;
        let full_prompt = if training.trim().is_empty() {
            request.system_prompt.clone()
        } else {
            format!("{}\n\n{}", request.system_prompt, training)
        };

        // Audited before the call so a crash mid-call still leaves a trail
        self.chat_log
            .append(AuditEntry::new(
                AuditAction::RequestAllowed,
                "message forwarded to advisor backend",
            ))
            .await;

        match self
            .forward(&sanitized.sanitized_text, &full_prompt, &request.context)
            .await
        {
            Ok(reply) => {
                debug!("Advisor backend replied ({} chars)", reply.len());
                ChatResponse {
                    success: true,
                    message: reply,
                    error: None,
                    rate_limit_info: Some(verdict),
                }
            }
            Err(e) => {
                // Full detail stays server-side; the caller sees a generic notice
                error!("Advisor backend call failed: {}", e);
                self.chat_log
                    .append(AuditEntry::new(
                        AuditAction::RequestError,
                        truncate_detail(&e.to_string()),
                    ))
                    .await;
                ChatResponse {
                    success: false,
                    message: UNAVAILABLE_MESSAGE.to_string(),
                    error: Some(ErrorCode::ServiceError),
                    rate_limit_info: None,
                }
            }
        }
    }

    /// Remote call with an explicit deadline; a timeout maps to the same
    /// failure path as any other backend error
    async fn forward(&self, message: &str, system_prompt: &str, context: &str) -> Result<String> {
        match tokio::time::timeout(
            self.call_timeout,
            self.backend.complete(message, system_prompt, context),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::timeout(format!(
                "backend call exceeded {:?}",
                self.call_timeout
            ))),
        }
    }

    /// Clear limiter state for one client key (admin recovery)
    pub async fn reset_rate_limit(&self, client_key: &str) -> Result<()> {
        self.limiter.reset(client_key).await
    }

    /// General chat audit trail, read-only
    pub fn audit_log(&self) -> &AuditLog {
        &self.chat_log
    }

    /// Security-incident trail, read-only
    pub fn security_log(&self) -> &AuditLog {
        &self.security_log
    }
}

fn truncate_detail(detail: &str) -> String {
    detail.chars().take(ERROR_DETAIL_CHARS).collect()
}
