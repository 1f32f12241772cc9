//! Storage layer for the gateway
//!
//! Rate-limit state and audit snapshots live behind an injected key-value
//! abstraction so the backend (in-memory map, file tree, Redis, SQL) is
//! swappable without touching the pipeline.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value store used for rate-limit state and audit snapshots.
///
/// Implementations must make `set` atomic per key; callers serialize
/// read-modify-write cycles themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` and its value
    async fn delete(&self, key: &str) -> Result<()>;
}
