//! Remote LLM backend
//!
//! The advisor model sits behind an OpenAI-compatible chat-completions API.
//! The gateway only ever sends sanitized text, and callers never see raw
//! backend errors.

use crate::config::LlmSettings;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Remote completion call, opaque and possibly slow or unreliable
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Generate advisor text for a sanitized message
    async fn complete(
        &self,
        message: &str,
        system_prompt: &str,
        context: &str,
    ) -> Result<String>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<OutboundMessage<'a>>,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: InboundMessage,
}

#[derive(Deserialize)]
struct InboundMessage {
    content: String,
}

/// OpenAI-compatible HTTP backend
pub struct HttpLlmBackend {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl HttpLlmBackend {
    /// Build a backend from the configured LLM settings
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }
}

#[async_trait]
impl LlmBackend for HttpLlmBackend {
    async fn complete(
        &self,
        message: &str,
        system_prompt: &str,
        context: &str,
    ) -> Result<String> {
        let mut messages = vec![OutboundMessage {
            role: "system",
            content: system_prompt,
        }];
        let context_line;
        if !context.is_empty() {
            context_line = format!("Conversation context: {context}");
            messages.push(OutboundMessage {
                role: "system",
                content: &context_line,
            });
        }
        messages.push(OutboundMessage {
            role: "user",
            content: message,
        });

        let request = CompletionRequest {
            model: &self.model,
            messages,
        };

        debug!("Forwarding advisor request to {}", self.api_base);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Backend returned {}: {}", status, body);
            return Err(GatewayError::backend(format!(
                "backend returned status {status}"
            )));
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::backend("backend returned no choices"))
    }
}
