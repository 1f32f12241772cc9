//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::gateway::ChatGateway;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// The request-gating pipeline
    pub gateway: Arc<ChatGateway>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, gateway: ChatGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway: Arc::new(gateway),
        }
    }
}
