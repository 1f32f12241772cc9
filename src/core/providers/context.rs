//! Training-context provider
//!
//! Supplies domain-knowledge snippets appended to the system prompt. The
//! contract is best-effort: implementations return an empty string on any
//! failure and never block the gateway.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

/// Source of domain-knowledge text for the advisor prompt
#[async_trait]
pub trait TrainingContextProvider: Send + Sync {
    /// Snippets to append to the system prompt; empty on any failure
    async fn training_context(&self) -> String;
}

/// Fixed snippet text, useful for tests and small deployments
#[derive(Debug, Clone, Default)]
pub struct StaticContextProvider {
    snippets: String,
}

impl StaticContextProvider {
    pub fn new<S: Into<String>>(snippets: S) -> Self {
        Self {
            snippets: snippets.into(),
        }
    }
}

#[async_trait]
impl TrainingContextProvider for StaticContextProvider {
    async fn training_context(&self) -> String {
        self.snippets.clone()
    }
}

/// Snippets read from a file on every request, so edits take effect without
/// a restart. A missing or unreadable file yields an empty context.
#[derive(Debug, Clone)]
pub struct FileContextProvider {
    path: PathBuf,
}

impl FileContextProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TrainingContextProvider for FileContextProvider {
    async fn training_context(&self) -> String {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(snippets) => snippets,
            Err(e) => {
                warn!("Training context unavailable from {:?}: {}", self.path, e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_snippets() {
        let provider = StaticContextProvider::new("booth sizing guidance");
        assert_eq!(provider.training_context().await, "booth sizing guidance");
    }

    #[tokio::test]
    async fn test_file_provider_missing_file_yields_empty() {
        let provider = FileContextProvider::new("/nonexistent/snippets.txt");
        assert_eq!(provider.training_context().await, "");
    }

    #[tokio::test]
    async fn test_file_provider_reads_current_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippets.txt");
        tokio::fs::write(&path, "lead capture tips").await.unwrap();

        let provider = FileContextProvider::new(&path);
        assert_eq!(provider.training_context().await, "lead capture tips");
    }
}
