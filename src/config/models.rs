//! Configuration sections

use crate::core::ratelimit::RateLimitConfig;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8085
}

fn default_max_requests() -> u32 {
    10
}

fn default_window_secs() -> u64 {
    60
}

fn default_cooldown_secs() -> u64 {
    30
}

fn default_chat_capacity() -> usize {
    crate::core::audit::CHAT_LOG_CAPACITY
}

fn default_security_capacity() -> usize {
    crate::core::audit::SECURITY_LOG_CAPACITY
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_system_prompt() -> String {
    "You are a knowledgeable trade-show and event-marketing advisor. \
     Answer questions about exhibiting, booth planning, and lead capture \
     concisely and practically. Decline requests outside that domain."
        .to_string()
}

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub context: ContextSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl GatewayConfig {
    /// Environment overrides for values that should not live in the file
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("ADVISOR_LLM_API_KEY") {
            self.llm.api_key = key;
        } else if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.llm.api_key = key;
        }
        if let Ok(host) = std::env::var("ADVISOR_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ADVISOR_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rate_limit.validate()?;
        self.audit.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; empty means same-origin only
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Throttling policy for the advisor chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl RateLimitSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(GatewayError::config("rate_limit.max_requests must be positive"));
        }
        if self.window_secs == 0 || self.cooldown_secs == 0 {
            return Err(GatewayError::config(
                "rate_limit window and cooldown must be positive",
            ));
        }
        Ok(())
    }

    /// Convert to the pipeline's policy type
    pub fn to_config(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.max_requests,
            window: Duration::from_secs(self.window_secs),
            cooldown: Duration::from_secs(self.cooldown_secs),
        }
    }
}

/// Audit log capacities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    #[serde(default = "default_chat_capacity")]
    pub chat_capacity: usize,
    #[serde(default = "default_security_capacity")]
    pub security_capacity: usize,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            chat_capacity: default_chat_capacity(),
            security_capacity: default_security_capacity(),
        }
    }
}

impl AuditSettings {
    pub fn validate(&self) -> Result<()> {
        if self.chat_capacity == 0 || self.security_capacity == 0 {
            return Err(GatewayError::config("audit capacities must be positive"));
        }
        Ok(())
    }
}

/// Remote LLM backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Usually injected via ADVISOR_LLM_API_KEY / OPENAI_API_KEY
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Remote call timeout; a timeout is treated as any other backend failure
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Base instruction text for the advisor
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl LlmSettings {
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(GatewayError::config("llm.model must not be empty"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(GatewayError::config(
                "llm.timeout_secs must be between 1 and 120",
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Training-context source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextSettings {
    /// Optional snippets file appended to the system prompt
    #[serde(default)]
    pub snippets_file: Option<String>,
}

/// Pipeline state persistence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory for durable state; unset keeps everything in memory
    #[serde(default)]
    pub data_dir: Option<String>,
}
