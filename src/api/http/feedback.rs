// src/api/http/feedback.rs
// Feedback submission: accepts form-encoded or JSON payloads, validates the
// enumerated fields, logs one structured record, retains nothing.

use axum::{
    Json,
    extract::{Form, FromRequest, Request},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackPayload {
    pub rating: Option<String>,
    pub source: Option<String>,
    // Arrives as a number from JSON clients and a string from form posts;
    // anything unparsable counts as 0.
    #[serde(rename = "messageCount")]
    pub message_count: Option<Value>,
    pub feedback: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// One validated submission. Logged once, never persisted.
#[derive(Debug)]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub ts: DateTime<Utc>,
    pub rating: Option<String>,
    pub source: Option<String>,
    pub message_count: i64,
    pub session_id: Option<String>,
    pub has_text: bool,
}

fn coerce_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn rejection(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "ok": false, "error": message }))).into_response()
}

pub async fn feedback_handler(req: Request) -> Response {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let payload: FeedbackPayload = if content_type.contains("application/x-www-form-urlencoded") {
        match Form::<FeedbackPayload>::from_request(req, &()).await {
            Ok(Form(payload)) => payload,
            Err(_) => return rejection("Invalid form payload"),
        }
    } else {
        // JSON (or anything else): a body that does not parse is treated as
        // an empty submission, which is still valid.
        let bytes = match axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES).await {
            Ok(bytes) => bytes,
            Err(_) => return rejection("Body too large"),
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    };

    // Allow purely textual feedback; reject unknown enumerated values.
    let rating_valid =
        matches!(payload.rating.as_deref(), None | Some("up") | Some("down"));
    let source_valid =
        matches!(payload.source.as_deref(), None | Some("auto") | Some("manual"));

    if !rating_valid || !source_valid {
        warn!(
            rating = ?payload.rating,
            source = ?payload.source,
            "Rejected feedback submission"
        );
        return rejection("Invalid payload: rating/source");
    }

    let record = FeedbackRecord {
        id: Uuid::new_v4(),
        ts: Utc::now(),
        rating: payload.rating,
        source: payload.source,
        message_count: coerce_count(payload.message_count.as_ref()),
        session_id: payload.session_id,
        has_text: payload
            .feedback
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty()),
    };

    info!(
        id = %record.id,
        ts = %record.ts.to_rfc3339(),
        rating = ?record.rating,
        source = ?record.source,
        message_count = record.message_count,
        session_id = ?record.session_id,
        has_text = record.has_text,
        "feedback"
    );

    Json(json!({ "ok": true })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count(Some(&json!(7))), 7);
        assert_eq!(coerce_count(Some(&json!("12"))), 12);
        assert_eq!(coerce_count(Some(&json!("not a number"))), 0);
        assert_eq!(coerce_count(Some(&json!(null))), 0);
        assert_eq!(coerce_count(None), 0);
    }
}
