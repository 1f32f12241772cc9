//! End-to-end pipeline tests through the public API

use advisor_gateway::core::audit::AuditLog;
use advisor_gateway::core::gateway::ChatGateway;
use advisor_gateway::core::providers::{LlmBackend, StaticContextProvider};
use advisor_gateway::core::ratelimit::{RateLimitConfig, RateLimiter};
use advisor_gateway::core::types::{ChatRequest, ErrorCode};
use advisor_gateway::storage::{FileStore, MemoryStore};
use advisor_gateway::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

struct SlowBackend;

#[async_trait]
impl LlmBackend for SlowBackend {
    async fn complete(&self, _: &str, _: &str, _: &str) -> Result<String> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Err(GatewayError::timeout("connect timeout after 5s"))
    }
}

struct EchoBackend;

#[async_trait]
impl LlmBackend for EchoBackend {
    async fn complete(&self, message: &str, _: &str, _: &str) -> Result<String> {
        Ok(format!("advisor: {message}"))
    }
}

fn pipeline(
    backend: Arc<dyn LlmBackend>,
    limiter: RateLimiter,
    call_timeout: Duration,
) -> ChatGateway {
    ChatGateway::new(
        limiter,
        AuditLog::new(200),
        AuditLog::new(100),
        backend,
        Arc::new(StaticContextProvider::default()),
        RateLimitConfig {
            max_requests: 3,
            window: Duration::from_secs(60),
            cooldown: Duration::from_secs(30),
        },
        call_timeout,
    )
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
        context: String::new(),
        system_prompt: "You are an event-marketing advisor.".to_string(),
    }
}

#[tokio::test]
async fn backend_timeout_yields_generic_service_error() {
    let gateway = pipeline(
        Arc::new(SlowBackend),
        RateLimiter::new(Arc::new(MemoryStore::new())),
        Duration::from_millis(100),
    );

    let response = gateway.handle("ip:203.0.113.7", request("Which booth?")).await;

    assert!(!response.success);
    assert_eq!(response.error, Some(ErrorCode::ServiceError));
    let lower = response.message.to_lowercase();
    assert!(!lower.contains("timeout"));
    assert!(!lower.contains("connect"));
    assert!(!lower.contains("backend"));
}

#[tokio::test]
async fn burst_past_the_limit_is_throttled() {
    let gateway = pipeline(
        Arc::new(EchoBackend),
        RateLimiter::new(Arc::new(MemoryStore::new())),
        Duration::from_secs(5),
    );

    let mut last = None;
    for _ in 0..4 {
        last = Some(gateway.handle("ip:203.0.113.7", request("same message")).await);
    }

    let response = last.unwrap();
    assert_eq!(response.error, Some(ErrorCode::RateLimit));
    let info = response.rate_limit_info.unwrap();
    assert!(info.retry_after_ms.unwrap() > 0);
}

#[tokio::test]
async fn cooldown_survives_a_process_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = Arc::new(FileStore::new(dir.path()).await.unwrap());
        let gateway = pipeline(
            Arc::new(EchoBackend),
            RateLimiter::new(store),
            Duration::from_secs(5),
        );
        for _ in 0..4 {
            gateway.handle("ip:203.0.113.7", request("hello")).await;
        }
    }

    // A fresh limiter over the same files still sees the cooldown
    let store = Arc::new(FileStore::new(dir.path()).await.unwrap());
    let gateway = pipeline(
        Arc::new(EchoBackend),
        RateLimiter::new(store),
        Duration::from_secs(5),
    );
    let response = gateway.handle("ip:203.0.113.7", request("hello again")).await;
    assert_eq!(response.error, Some(ErrorCode::RateLimit));
}

#[tokio::test]
async fn distinct_clients_are_throttled_independently() {
    let gateway = pipeline(
        Arc::new(EchoBackend),
        RateLimiter::new(Arc::new(MemoryStore::new())),
        Duration::from_secs(5),
    );

    for _ in 0..4 {
        gateway.handle("ip:203.0.113.7", request("hello")).await;
    }

    let response = gateway.handle("ip:198.51.100.4", request("hello")).await;
    assert!(response.success);
    assert_eq!(response.message, "advisor: hello");
}
