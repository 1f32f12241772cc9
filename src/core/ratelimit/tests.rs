//! Tests for the sliding-window rate limiter

use super::limiter::RateLimiter;
use super::types::RateLimitConfig;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;

fn limiter() -> RateLimiter {
    RateLimiter::new(Arc::new(MemoryStore::new()))
}

fn config(max_requests: u32) -> RateLimitConfig {
    RateLimitConfig {
        max_requests,
        window: Duration::from_secs(60),
        cooldown: Duration::from_secs(30),
    }
}

#[tokio::test]
async fn test_first_n_requests_admitted_with_decreasing_remaining() {
    let limiter = limiter();
    let config = config(5);
    let now = Utc::now();

    for expected_remaining in [4, 3, 2, 1, 0] {
        let result = limiter.check_at("client-a", &config, now).await;
        assert!(result.allowed);
        assert_eq!(result.remaining_requests, expected_remaining);
        assert!(result.retry_after_ms.is_none());
    }
}

#[tokio::test]
async fn test_request_over_limit_denied_with_cooldown_retry() {
    let limiter = limiter();
    let config = config(3);
    let now = Utc::now();

    for _ in 0..3 {
        assert!(limiter.check_at("client-a", &config, now).await.allowed);
    }

    let result = limiter.check_at("client-a", &config, now).await;
    assert!(!result.allowed);
    assert_eq!(result.remaining_requests, 0);
    assert_eq!(result.retry_after_ms, Some(30_000));
}

#[tokio::test]
async fn test_cooldown_rejects_until_it_elapses() {
    let limiter = limiter();
    let config = config(2);
    let now = Utc::now();

    for _ in 0..3 {
        limiter.check_at("client-a", &config, now).await;
    }

    // Still inside the cooldown: denied, with the remaining wait reported
    let later = now + ChronoDuration::seconds(10);
    let result = limiter.check_at("client-a", &config, later).await;
    assert!(!result.allowed);
    let retry = result.retry_after_ms.unwrap();
    assert!(retry > 0 && retry <= 20_000);

    // Past the cooldown (and the window): admitted again
    let after = now + ChronoDuration::seconds(61);
    let result = limiter.check_at("client-a", &config, after).await;
    assert!(result.allowed);
}

#[tokio::test]
async fn test_window_slides_rather_than_resetting() {
    let limiter = limiter();
    let config = config(2);
    let now = Utc::now();

    limiter.check_at("client-a", &config, now).await;
    limiter
        .check_at("client-a", &config, now + ChronoDuration::seconds(30))
        .await;

    // 61s after the first request it has left the window, freeing one slot
    let result = limiter
        .check_at("client-a", &config, now + ChronoDuration::seconds(61))
        .await;
    assert!(result.allowed);
    assert_eq!(result.remaining_requests, 0);
}

#[tokio::test]
async fn test_reset_restores_fresh_key_behavior() {
    let limiter = limiter();
    let config = config(2);
    let now = Utc::now();

    for _ in 0..3 {
        limiter.check_at("client-a", &config, now).await;
    }
    assert!(!limiter.check_at("client-a", &config, now).await.allowed);

    limiter.reset("client-a").await.unwrap();
    assert_eq!(limiter.tracked_keys(), 0);

    let result = limiter.check_at("client-a", &config, now).await;
    assert!(result.allowed);
    assert_eq!(result.remaining_requests, 1);
}

#[tokio::test]
async fn test_cleanup_reclaims_idle_keys() {
    let store = Arc::new(MemoryStore::new());
    let limiter = RateLimiter::new(store.clone());
    let config = config(5);
    let now = Utc::now();

    // A crowd of one-off clients whose windows elapsed long ago
    let past = now - ChronoDuration::hours(24);
    for i in 0..50 {
        limiter.check_at(&format!("client-{i}"), &config, past).await;
    }
    limiter.check_at("client-live", &config, now).await;
    assert_eq!(store.len(), 51);
    assert_eq!(limiter.tracked_keys(), 51);

    limiter.cleanup_at(&config, now).await;

    assert_eq!(store.len(), 1);
    assert_eq!(limiter.tracked_keys(), 1);
    assert!(store.get("ratelimit:client-live").await.unwrap().is_some());

    // A reclaimed key starts over as if never seen
    let result = limiter.check_at("client-0", &config, now).await;
    assert!(result.allowed);
    assert_eq!(result.remaining_requests, 4);
}

#[tokio::test]
async fn test_cleanup_keeps_keys_in_cooldown() {
    let store = Arc::new(MemoryStore::new());
    let limiter = RateLimiter::new(store.clone());
    let config = config(1);
    let now = Utc::now();

    limiter.check_at("client-a", &config, now).await;
    assert!(!limiter.check_at("client-a", &config, now).await.allowed);

    // Mid-cooldown the key must survive a sweep
    limiter
        .cleanup_at(&config, now + ChronoDuration::seconds(10))
        .await;
    assert_eq!(store.len(), 1);
    let result = limiter
        .check_at("client-a", &config, now + ChronoDuration::seconds(15))
        .await;
    assert!(!result.allowed);

    // Window and cooldown both elapsed: reclaimed
    limiter
        .cleanup_at(&config, now + ChronoDuration::seconds(61))
        .await;
    assert_eq!(store.len(), 0);
    assert_eq!(limiter.tracked_keys(), 0);
}

#[tokio::test]
async fn test_keys_do_not_share_state() {
    let limiter = limiter();
    let config = config(1);
    let now = Utc::now();

    assert!(limiter.check_at("client-a", &config, now).await.allowed);
    assert!(!limiter.check_at("client-a", &config, now).await.allowed);
    assert!(limiter.check_at("client-b", &config, now).await.allowed);
}

#[tokio::test]
async fn test_default_config_values() {
    let config = RateLimitConfig::default();
    assert_eq!(config.max_requests, 10);
    assert_eq!(config.window, Duration::from_secs(60));
    assert_eq!(config.cooldown, Duration::from_secs(30));
}

/// Store whose every operation fails, for fail-closed coverage
struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(GatewayError::storage("store offline"))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(GatewayError::storage("store offline"))
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Err(GatewayError::storage("store offline"))
    }
}

#[tokio::test]
async fn test_storage_failure_denies_request() {
    let limiter = RateLimiter::new(Arc::new(FailingStore));
    let result = limiter
        .check_at("client-a", &RateLimitConfig::default(), Utc::now())
        .await;
    assert!(!result.allowed);
    assert_eq!(result.remaining_requests, 0);
}

#[tokio::test]
async fn test_corrupt_state_denies_request() {
    let store = Arc::new(MemoryStore::new());
    store.set("ratelimit:client-a", "not json").await.unwrap();

    let limiter = RateLimiter::new(store);
    let result = limiter
        .check_at("client-a", &RateLimitConfig::default(), Utc::now())
        .await;
    assert!(!result.allowed);
}

#[tokio::test]
async fn test_concurrent_requests_respect_last_slot() {
    let limiter = Arc::new(limiter());
    let config = Arc::new(config(5));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let limiter = Arc::clone(&limiter);
        let config = Arc::clone(&config);
        handles.push(tokio::spawn(async move {
            limiter.check_and_record("client-a", &config).await.allowed
        }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 5);
}
