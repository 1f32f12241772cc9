//! Core AuditLog implementation

use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::warn;

/// Capacity of the general chat audit log
pub const CHAT_LOG_CAPACITY: usize = 200;

/// Capacity of the security-incident log
pub const SECURITY_LOG_CAPACITY: usize = 100;

/// Longest stored input preview, in characters; never the full message
pub const INPUT_PREVIEW_CHARS: usize = 80;

/// Pipeline decision recorded in an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    RequestAllowed,
    RequestBlockedRateLimit,
    RequestBlockedSanitizer,
    RequestError,
}

/// A single immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_preview: Option<String>,
}

impl AuditEntry {
    /// Create an entry stamped with the current time
    pub fn new<S: Into<String>>(action: AuditAction, details: S) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            details: details.into(),
            input_preview: None,
        }
    }

    /// Attach a bounded preview of the offending input
    pub fn with_preview(mut self, raw: &str) -> Self {
        self.input_preview = Some(preview(raw));
        self
    }
}

/// Truncate `raw` to [`INPUT_PREVIEW_CHARS`] characters
pub(crate) fn preview(raw: &str) -> String {
    raw.chars().take(INPUT_PREVIEW_CHARS).collect()
}

/// Size-bounded append-only log with FIFO eviction
///
/// Appends never propagate persistence failures: losing an audit record is
/// acceptable, losing chat availability because the audit store is down is
/// not. This is the opposite policy from the rate limiter, on purpose.
pub struct AuditLog {
    entries: RwLock<VecDeque<AuditEntry>>,
    capacity: usize,
    persistence: Option<(Arc<dyn KeyValueStore>, String)>,
}

impl AuditLog {
    /// In-memory log holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
            persistence: None,
        }
    }

    /// Log persisted under `storage_key`, restored best-effort from the store
    ///
    /// A missing or corrupt snapshot yields an empty log.
    pub async fn restore(
        capacity: usize,
        store: Arc<dyn KeyValueStore>,
        storage_key: impl Into<String>,
    ) -> Self {
        let storage_key = storage_key.into();
        let mut entries: VecDeque<AuditEntry> = match store.get(&storage_key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Discarding corrupt audit snapshot {storage_key:?}: {e}");
                VecDeque::new()
            }),
            Ok(None) => VecDeque::new(),
            Err(e) => {
                warn!("Could not restore audit snapshot {storage_key:?}: {e}");
                VecDeque::new()
            }
        };
        while entries.len() > capacity {
            entries.pop_front();
        }

        Self {
            entries: RwLock::new(entries),
            capacity,
            persistence: Some((store, storage_key)),
        }
    }

    /// Append an entry, evicting the oldest once at capacity
    pub async fn append(&self, entry: AuditEntry) {
        let snapshot = {
            let mut entries = self.entries.write();
            entries.push_back(entry);
            while entries.len() > self.capacity {
                entries.pop_front();
            }
            self.persistence
                .as_ref()
                .map(|_| entries.iter().cloned().collect::<Vec<_>>())
        };

        // Best-effort persistence, outside the lock
        if let (Some((store, storage_key)), Some(snapshot)) = (&self.persistence, snapshot) {
            match serde_json::to_string(&snapshot) {
                Ok(raw) => {
                    if let Err(e) = store.set(storage_key, &raw).await {
                        warn!("Audit persistence failed for {storage_key:?}: {e}");
                    }
                }
                Err(e) => warn!("Audit snapshot serialization failed: {e}"),
            }
        }
    }

    /// All entries, oldest first
    pub fn list(&self) -> Vec<AuditEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the log holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
