// src/llm/mod.rs
// Model gateway: the trait at the seam, the provider client, and the
// schema-constrained summary extraction.

pub mod client;
pub mod error;
pub mod structured;

pub use client::OpenAIClient;
pub use error::LlmError;
pub use structured::SummaryRecord;

use async_trait::async_trait;

use crate::api::types::ChatMessage;

/// The external collaborator boundary: a black-box text-completion service
/// accepting an ordered list of role-tagged messages. Kept as a trait so the
/// HTTP handlers and the conversation session can be exercised against a stub.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// One completion call over the assembled prompt stack, with a bounded wait.
    async fn complete(&self, stack: &[ChatMessage]) -> Result<String, LlmError>;

    /// One-shot, schema-constrained extraction over a transcript snapshot.
    async fn summarize(&self, transcript: &[ChatMessage]) -> Result<SummaryRecord, LlmError>;
}
