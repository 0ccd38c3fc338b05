// src/llm/client.rs
// Chat-completions client for an OpenAI-compatible provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, header};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::api::types::ChatMessage;
use crate::config::CONFIG;
use crate::llm::error::LlmError;
use crate::llm::structured::{self, SummaryRecord};
use crate::llm::CompletionBackend;

/// Substituted when the provider answers 2xx but the reply is missing/empty.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a reply.";

pub struct OpenAIClient {
    client: ReqwestClient,
    base_url: String,
    // Absence is a per-request error, not a startup failure, so the server
    // can boot in environments where the key arrives later.
    api_key: Option<String>,
    chat_model: String,
    summary_model: String,
    chat_temperature: f32,
    summary_temperature: f32,
}

impl OpenAIClient {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty());

        info!(
            "Initializing model client: chat_model={}, summary_model={}, timeout={}s, key={}",
            CONFIG.chat_model,
            CONFIG.summary_model,
            CONFIG.request_timeout_secs,
            if api_key.is_some() { "present" } else { "MISSING" },
        );

        let client = ReqwestClient::builder()
            .timeout(CONFIG.request_timeout())
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: CONFIG.openai_base_url.clone(),
            api_key,
            chat_model: CONFIG.chat_model.clone(),
            summary_model: CONFIG.summary_model.clone(),
            chat_temperature: CONFIG.chat_temperature,
            summary_temperature: CONFIG.summary_temperature,
        })
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key.as_deref().ok_or(LlmError::MissingCredentials)
    }

    async fn post_chat_completions(&self, body: Value) -> Result<Value, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!("Posting completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key()?))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Reply text out of a chat-completions response, if present and non-empty.
fn extract_reply(response: &Value) -> Option<String> {
    response["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    async fn complete(&self, stack: &[ChatMessage]) -> Result<String, LlmError> {
        let body = json!({
            "model": self.chat_model,
            "messages": stack,
            "temperature": self.chat_temperature,
        });

        let response = self.post_chat_completions(body).await?;
        extract_reply(&response).ok_or(LlmError::MalformedReply)
    }

    async fn summarize(&self, transcript: &[ChatMessage]) -> Result<SummaryRecord, LlmError> {
        let body = structured::build_summary_request(
            transcript,
            &self.summary_model,
            self.summary_temperature,
        );

        let response = self.post_chat_completions(body).await?;
        let raw = extract_reply(&response).ok_or(LlmError::MalformedReply)?;
        structured::parse_summary(&raw)
    }
}
