// tests/http_api.rs
// In-process endpoint tests against a stub completion backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use wellspring::api::http::http_router;
use wellspring::api::types::ChatMessage;
use wellspring::llm::{CompletionBackend, LlmError, SummaryRecord};
use wellspring::state::create_app_state;

/// What the stub should do when the handlers reach the gateway.
#[derive(Clone, Copy)]
enum StubMode {
    Reply,
    MalformedReply,
    Timeout,
    Upstream502,
    MissingKey,
    SummaryParseError,
}

struct StubBackend {
    mode: StubMode,
    calls: AtomicUsize,
}

#[async_trait]
impl CompletionBackend for StubBackend {
    async fn complete(&self, _stack: &[ChatMessage]) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StubMode::Reply => Ok("stub reply".to_string()),
            StubMode::MalformedReply => Err(LlmError::MalformedReply),
            StubMode::Timeout => Err(LlmError::Timeout),
            StubMode::Upstream502 => Err(LlmError::Upstream {
                status: 502,
                body: "bad gateway".to_string(),
            }),
            StubMode::MissingKey => Err(LlmError::MissingCredentials),
            StubMode::SummaryParseError => Ok("stub reply".to_string()),
        }
    }

    async fn summarize(&self, _transcript: &[ChatMessage]) -> Result<SummaryRecord, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            StubMode::SummaryParseError => Err(LlmError::Parse),
            StubMode::Upstream502 => Err(LlmError::Upstream {
                status: 502,
                body: "bad gateway".to_string(),
            }),
            _ => Ok(SummaryRecord {
                issue: "work stress".to_string(),
                emotion: "anxious".to_string(),
                short_term_goal: "one short walk each day".to_string(),
                long_term_goal: String::new(),
                summary: "Talked through workload pressure.".to_string(),
            }),
        }
    }
}

fn app(mode: StubMode) -> (Router, Arc<StubBackend>) {
    let backend = Arc::new(StubBackend { mode, calls: AtomicUsize::new(0) });
    let router = http_router(Arc::new(create_app_state(backend.clone())));
    (router, backend)
}

fn post(uri: &str, content_type: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.into()))
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    post(uri, "application/json", body.to_string())
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn chat_body(texts: &[(&str, &str)]) -> Value {
    let messages: Vec<Value> = texts
        .iter()
        .map(|(role, content)| json!({ "role": role, "content": content }))
        .collect();
    json!({ "messages": messages })
}

#[tokio::test]
async fn health_reports_ok() {
    let (app, _) = app(StubMode::Reply);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn crisis_turn_gets_canned_reply_without_model_call() {
    let (app, backend) = app(StubMode::Reply);
    let request = post_json("/api/chat", &chat_body(&[("user", "I want to kill myself")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.contains("13 11 14"), "crisis reply must name the helpline: {reply}");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0, "model must not be called");
}

#[tokio::test]
async fn medical_emergency_turn_bypasses_model() {
    let (app, backend) = app(StubMode::Reply);
    let request = post_json("/api/chat", &chat_body(&[("user", "my chest pain is severe")]));
    let response = app.oneshot(request).await.unwrap();

    let body = body_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("medical emergency"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wellbeing_turn_forwards_and_disables_caching() {
    let (app, backend) = app(StubMode::Reply);
    let request = post_json("/api/chat", &chat_body(&[("user", "I've been so stressed")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let body = body_json(response).await;
    assert_eq!(body["reply"], "stub reply");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn malformed_chat_body_is_treated_as_empty_transcript() {
    let (app, _) = app(StubMode::Reply);
    let response = app
        .oneshot(post("/api/chat", "application/json", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["reply"], "stub reply");
}

#[tokio::test]
async fn empty_model_reply_becomes_fallback_text() {
    let (app, _) = app(StubMode::MalformedReply);
    let request = post_json("/api/chat", &chat_body(&[("user", "feeling low on motivation")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["reply"], "Sorry, I couldn't generate a reply.");
}

#[tokio::test]
async fn timeout_is_surfaced_as_gateway_timeout() {
    let (app, _) = app(StubMode::Timeout);
    let request = post_json("/api/chat", &chat_body(&[("user", "trouble with sleep")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body = body_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn upstream_failure_propagates_status() {
    let (app, _) = app(StubMode::Upstream502);
    let request = post_json("/api/chat", &chat_body(&[("user", "grief has been heavy")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert!(body["reply"].as_str().unwrap().starts_with("Upstream error: 502"));
}

#[tokio::test]
async fn missing_credentials_reported_in_reply() {
    let (app, _) = app(StubMode::MissingKey);
    let request = post_json("/api/chat", &chat_body(&[("user", "burnout again")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn summary_rejects_empty_transcript() {
    let (app, backend) = app(StubMode::Reply);
    let response = app
        .oneshot(post_json("/api/summary", &json!({ "messages": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No messages provided.");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn summary_returns_camel_case_record() {
    let (app, _) = app(StubMode::Reply);
    let request = post_json(
        "/api/summary",
        &chat_body(&[("user", "work has me stressed"), ("assistant", "tell me more")]),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["issue"], "work stress");
    assert_eq!(body["shortTermGoal"], "one short walk each day");
    assert_eq!(body["longTermGoal"], "");
}

#[tokio::test]
async fn summary_parse_failure_is_distinct_error() {
    let (app, _) = app(StubMode::SummaryParseError);
    let request = post_json("/api/summary", &chat_body(&[("user", "hello")]));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid JSON from model.");
}

#[tokio::test]
async fn feedback_accepts_json_payload() {
    let (app, _) = app(StubMode::Reply);
    let request = post_json(
        "/api/feedback",
        &json!({ "rating": "up", "source": "manual", "messageCount": 6 }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn feedback_accepts_form_payload() {
    let (app, _) = app(StubMode::Reply);
    let request = post(
        "/api/feedback",
        "application/x-www-form-urlencoded",
        "rating=down&source=auto&messageCount=3&feedback=too+fast",
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn feedback_rejects_unknown_rating() {
    let (app, _) = app(StubMode::Reply);
    let request = post_json("/api/feedback", &json!({ "rating": "sideways" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn feedback_rejects_unknown_source() {
    let (app, _) = app(StubMode::Reply);
    let request = post_json("/api/feedback", &json!({ "source": "telepathy" }));
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn feedback_allows_empty_submission() {
    let (app, _) = app(StubMode::Reply);
    let response = app
        .oneshot(post_json("/api/feedback", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_on_post_endpoint_is_method_not_allowed() {
    let (app, _) = app(StubMode::Reply);
    let response = app
        .oneshot(Request::builder().uri("/api/chat").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
