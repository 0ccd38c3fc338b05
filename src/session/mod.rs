// src/session/mod.rs
//! Client-held conversation state for embedders: an ordered transcript with
//! single-flight sends.
//!
//! At most one model request may be outstanding per session. A new send
//! cancels the prior in-flight call (not merely ignores its result), and a
//! cancelled call appends nothing, so out-of-order replies can never land in
//! the transcript. The summary call works on a read-only snapshot and may run
//! concurrently with a live send.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::types::ChatMessage;
use crate::llm::{CompletionBackend, LlmError, SummaryRecord};
use crate::routing::{ConversationRouter, RouteOutcome};

struct SessionInner {
    messages: Vec<ChatMessage>,
    in_flight: Option<CancellationToken>,
    // Identifies the latest send; an older send finding a newer generation
    // must drop its result.
    generation: u64,
}

pub struct ConversationSession {
    backend: Arc<dyn CompletionBackend>,
    router: ConversationRouter,
    inner: Mutex<SessionInner>,
}

impl ConversationSession {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            backend,
            router: ConversationRouter::new(),
            inner: Mutex::new(SessionInner {
                messages: Vec::new(),
                in_flight: None,
                generation: 0,
            }),
        }
    }

    /// Send one user turn. Returns the assistant reply, or `Ok(None)` when a
    /// newer send superseded this one before its reply could be appended.
    pub async fn send(&self, user_text: &str) -> Result<Option<String>, LlmError> {
        let token = CancellationToken::new();

        let (my_generation, outcome) = {
            let mut inner = self.inner.lock().await;
            if let Some(previous) = inner.in_flight.replace(token.clone()) {
                debug!("superseding in-flight request");
                previous.cancel();
            }
            inner.generation += 1;
            inner.messages.push(ChatMessage::user(user_text));
            (inner.generation, self.router.route(&inner.messages))
        };

        let reply = match outcome {
            RouteOutcome::Canned(reply) => reply,
            RouteOutcome::Forward(stack) => {
                tokio::select! {
                    _ = token.cancelled() => return Ok(None),
                    result = self.backend.complete(&stack) => match result {
                        Ok(reply) => reply,
                        Err(err) => {
                            self.finish(my_generation).await;
                            return Err(err);
                        }
                    },
                }
            }
        };

        let mut inner = self.inner.lock().await;
        if inner.generation != my_generation || token.is_cancelled() {
            return Ok(None);
        }
        inner.messages.push(ChatMessage::assistant(&reply));
        inner.in_flight = None;
        Ok(Some(reply))
    }

    /// Summarize a snapshot of the transcript. Independent of the live send.
    pub async fn summarize(&self) -> Result<SummaryRecord, LlmError> {
        let snapshot = self.transcript().await;
        self.backend.summarize(&snapshot).await
    }

    /// Snapshot of the transcript so far.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.inner.lock().await.messages.clone()
    }

    /// End the conversation: cancel any in-flight call and clear the
    /// transcript.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        if let Some(in_flight) = inner.in_flight.take() {
            in_flight.cancel();
        }
        inner.generation += 1;
        inner.messages.clear();
    }

    async fn finish(&self, my_generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.generation == my_generation {
            inner.in_flight = None;
        }
    }
}
