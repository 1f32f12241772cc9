//! # Advisor Gateway
//!
//! Request-gating pipeline for an LLM-backed "AI advisor" chat feature. Every
//! submission passes, in order, through a sliding-window rate limiter with a
//! cooldown lock, a prompt-injection sanitizer, and context augmentation
//! before reaching the remote model; every decision lands in a size-bounded
//! audit trail.
//!
//! ## Features
//!
//! - **Sliding-window throttling**: per-client admission over a true sliding
//!   window, with a cooldown lockout once the limit is exceeded
//! - **Prompt-injection screening**: an ordered, tagged rule list catching
//!   instruction overrides, role switches, prompt extraction, and embedded
//!   executable content
//! - **Audit trail**: ring-buffered chat and security-incident logs, restored
//!   best-effort from an injected key-value store
//! - **Opaque backend**: the LLM call is a trait seam with an explicit timeout
//!
//! ## Embedding the pipeline
//!
//! ```rust,no_run
//! use advisor_gateway::core::audit::AuditLog;
//! use advisor_gateway::core::gateway::ChatGateway;
//! use advisor_gateway::core::providers::{HttpLlmBackend, StaticContextProvider};
//! use advisor_gateway::core::ratelimit::{RateLimitConfig, RateLimiter};
//! use advisor_gateway::core::types::ChatRequest;
//! use advisor_gateway::config::LlmSettings;
//! use advisor_gateway::storage::MemoryStore;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> advisor_gateway::Result<()> {
//!     let settings = LlmSettings::default();
//!     let gateway = ChatGateway::new(
//!         RateLimiter::new(Arc::new(MemoryStore::new())),
//!         AuditLog::new(200),
//!         AuditLog::new(100),
//!         Arc::new(HttpLlmBackend::new(&settings)?),
//!         Arc::new(StaticContextProvider::default()),
//!         RateLimitConfig::default(),
//!         Duration::from_secs(20),
//!     );
//!
//!     let response = gateway
//!         .handle("ip:203.0.113.7", ChatRequest {
//!             message: "Which booth size should I book?".to_string(),
//!             context: String::new(),
//!             system_prompt: settings.system_prompt.clone(),
//!         })
//!         .await;
//!     println!("{}", response.message);
//!     Ok(())
//! }
//! ```
//!
//! ## Server mode
//!
//! ```rust,no_run
//! use advisor_gateway::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> advisor_gateway::Result<()> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let server = server::HttpServer::new(&config).await?;
//!     server.start().await
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::gateway::ChatGateway;
pub use core::types::{ChatRequest, ChatResponse, ErrorCode};
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
