//! Core RateLimiter implementation

use super::types::{RateLimitConfig, RateLimitResult, RateLimitState};
use crate::storage::KeyValueStore;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// How often the background task sweeps idle keys
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Sliding-window rate limiter over an injected key-value store
///
/// Each key's prune/count/decide/persist cycle runs under a per-key async
/// mutex so two concurrent requests for the same key cannot both observe the
/// last free slot. Distinct keys do not contend.
///
/// Storage failures deny the request (fail-closed): an attacker who can
/// disrupt the store must not be able to bypass throttling.
///
/// Clones share the store and the lock map.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl RateLimiter {
    /// Create a limiter persisting state into `store`
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Check the policy for `key` and record the request if admitted
    pub async fn check_and_record(&self, key: &str, config: &RateLimitConfig) -> RateLimitResult {
        self.check_at(key, config, Utc::now()).await
    }

    /// Clear all limiter state for `key` (admin recovery, tests)
    pub async fn reset(&self, key: &str) -> Result<()> {
        debug!("Resetting rate limit state for key");
        self.store.delete(&Self::storage_key(key)).await?;
        self.locks.remove(key);
        Ok(())
    }

    /// Drop state for keys whose window and cooldown have both elapsed
    ///
    /// Without this, every client key ever seen would keep one lock entry
    /// and one store record forever.
    pub async fn cleanup(&self, config: &RateLimitConfig) {
        self.cleanup_at(config, Utc::now()).await;
    }

    /// Sweep idle keys every [`CLEANUP_INTERVAL`] for as long as the
    /// limiter (or any clone of it) is in use
    pub fn start_cleanup_task(&self, config: RateLimitConfig) {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                limiter.cleanup(&config).await;
            }
        });
    }

    /// Policy evaluation at an explicit instant; the seam unit tests use
    /// instead of sleeping through real windows
    pub(super) async fn check_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now: DateTime<Utc>,
    ) -> RateLimitResult {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        let storage_key = Self::storage_key(key);
        let mut state = match self.load_state(&storage_key).await {
            Ok(state) => state,
            Err(e) => {
                error!("Rate limit state unavailable, denying request: {}", e);
                return RateLimitResult::deny(None);
            }
        };

        // An active cooldown rejects without recording anything
        if let Some(blocked_until) = state.blocked_until {
            if now < blocked_until {
                let retry_ms = (blocked_until - now).num_milliseconds().max(0) as u64;
                return RateLimitResult::deny(Some(retry_ms));
            }
            state.blocked_until = None;
        }

        let window =
            chrono::Duration::from_std(config.window).unwrap_or(chrono::Duration::MAX);
        state.timestamps.retain(|&t| now - t < window);

        if state.timestamps.len() as u32 >= config.max_requests {
            let cooldown =
                chrono::Duration::from_std(config.cooldown).unwrap_or(chrono::Duration::MAX);
            state.blocked_until = Some(now + cooldown);
            warn!(
                "Rate limit exceeded ({} requests in window), cooling down for {:?}",
                state.timestamps.len(),
                config.cooldown
            );
            if let Err(e) = self.persist_state(&storage_key, &state).await {
                error!("Failed to persist cooldown, denying request: {}", e);
                return RateLimitResult::deny(None);
            }
            return RateLimitResult::deny(Some(config.cooldown.as_millis() as u64));
        }

        state.timestamps.push(now);
        if let Err(e) = self.persist_state(&storage_key, &state).await {
            error!("Failed to record request, denying it: {}", e);
            return RateLimitResult::deny(None);
        }

        RateLimitResult::admit(config.max_requests - state.timestamps.len() as u32)
    }

    /// Sweep at an explicit instant, as the unit tests do
    pub(super) async fn cleanup_at(&self, config: &RateLimitConfig, now: DateTime<Utc>) {
        let window =
            chrono::Duration::from_std(config.window).unwrap_or(chrono::Duration::MAX);
        let keys: Vec<String> = self.locks.iter().map(|entry| entry.key().clone()).collect();

        let mut reclaimed = 0usize;
        for key in keys {
            let lock = self.lock_for(&key);
            let _guard = lock.lock().await;

            let storage_key = Self::storage_key(&key);
            let state = match self.load_state(&storage_key).await {
                Ok(state) => state,
                // Unreadable state is left in place; check_at denies on it
                Err(_) => continue,
            };

            let cooling = state.blocked_until.is_some_and(|until| now < until);
            let live = state.timestamps.iter().any(|&t| now - t < window);
            if cooling || live {
                continue;
            }

            if let Err(e) = self.store.delete(&storage_key).await {
                warn!("Failed to drop idle rate limit state: {}", e);
                continue;
            }
            // The entry is only removed when nobody else holds its mutex;
            // a concurrent check_at keeps a third reference and wins
            self.locks
                .remove_if(&key, |_, lock| Arc::strong_count(lock) <= 2);
            reclaimed += 1;
        }

        if reclaimed > 0 {
            debug!("Reclaimed rate limit state for {} idle keys", reclaimed);
        }
    }

    /// Number of keys currently holding a lock entry
    pub(super) fn tracked_keys(&self) -> usize {
        self.locks.len()
    }

    fn storage_key(key: &str) -> String {
        format!("ratelimit:{key}")
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    async fn load_state(&self, storage_key: &str) -> Result<RateLimitState> {
        match self.store.get(storage_key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(RateLimitState::default()),
        }
    }

    async fn persist_state(&self, storage_key: &str, state: &RateLimitState) -> Result<()> {
        let raw = serde_json::to_string(state)?;
        self.store.set(storage_key, &raw).await
    }
}
