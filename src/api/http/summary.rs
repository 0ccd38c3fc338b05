// src/api/http/summary.rs
// On-demand transcript summary via a schema-constrained extraction call.

use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::ChatMessage;
use crate::llm::{LlmError, SummaryRecord};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

pub async fn summary_handler(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> impl IntoResponse {
    let result: ApiResult<Json<SummaryRecord>> = async {
        let request: SummaryRequest = serde_json::from_slice(&body).unwrap_or_default();

        // Rejected before any external call is attempted.
        if request.messages.is_empty() {
            return Err(ApiError::bad_request("No messages provided."));
        }

        info!("Summarizing transcript snapshot: {} messages", request.messages.len());

        let record = app_state
            .backend
            .summarize(&request.messages)
            .await
            .map_err(|err| match err {
                LlmError::Upstream { body, .. } if !body.is_empty() => ApiError::internal(body),
                LlmError::Upstream { .. } => ApiError::internal("Model error."),
                other => ApiError::internal(other.to_string()),
            })?;

        Ok(Json(record))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(err) => {
            error!("Summary request failed: {}", err.message);
            err.into_response()
        }
    }
}
