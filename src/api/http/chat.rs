// src/api/http/chat.rs
// One chat turn: intent gate, protocol detection, prompt assembly, model call.
// Failures always produce an assistant-style `reply` the client can render,
// never a blank state.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::types::ChatMessage;
use crate::llm::LlmError;
use crate::llm::client::FALLBACK_REPLY;
use crate::routing::RouteOutcome;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

fn reply_with(status: StatusCode, reply: impl Into<String>) -> Response {
    (status, Json(ChatReply { reply: reply.into() })).into_response()
}

pub async fn chat_handler(State(app_state): State<Arc<AppState>>, body: Bytes) -> Response {
    // A missing or malformed body is treated as an empty transcript.
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    info!("Chat turn received: {} transcript messages", request.messages.len());

    let stack = match app_state.router.route(&request.messages) {
        RouteOutcome::Canned(reply) => return reply_with(StatusCode::OK, reply),
        RouteOutcome::Forward(stack) => stack,
    };

    match app_state.backend.complete(&stack).await {
        Ok(reply) => reply_with(StatusCode::OK, reply),
        Err(LlmError::MalformedReply) => reply_with(StatusCode::OK, FALLBACK_REPLY),
        Err(err @ LlmError::Timeout) => reply_with(StatusCode::GATEWAY_TIMEOUT, err.to_string()),
        Err(err @ LlmError::MissingCredentials) => {
            error!("Chat turn rejected: missing provider credentials");
            reply_with(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(LlmError::Upstream { status, body }) => {
            error!("Upstream provider error: {} {}", status, body);
            let status =
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            reply_with(status, format!("Upstream error: {} {}", status.as_u16(), body))
        }
        Err(err) => {
            error!("Chat turn failed: {}", err);
            reply_with(StatusCode::INTERNAL_SERVER_ERROR, format!("Server error: {}", err))
        }
    }
}
